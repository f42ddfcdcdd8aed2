#![cfg_attr(docsrs, feature(doc_cfg))]

//! bom - Console front-end for the component catalog
//! bom - 组件目录的控制台前端

pub mod cmd;
pub mod parse;

pub use bom_catalog::{Catalog, ComponentRec, Error, Kind, Result, SpecItemView};
