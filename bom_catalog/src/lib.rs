#![cfg_attr(docsrs, feature(doc_cfg))]

//! bom_catalog - Catalog service over the paired `.prd`/`.prs` stores
//! bom_catalog - 基于配对 `.prd`/`.prs` 存储的目录服务

mod catalog;
mod spec;
mod tree;
mod truncate;
mod view;

pub use bom_base::{Error, Kind, NIL, Result};
pub use bom_prd::ComponentRec;
pub use bom_prs::SpecEdge;
pub use catalog::Catalog;
pub use view::SpecItemView;
