#![cfg_attr(docsrs, feature(doc_cfg))]

//! bom_prs - BOM-edge store over the `.prs` file
//! bom_prs - 基于 `.prs` 文件的 BOM 边存储

mod disk;
mod edge;
mod prs;

pub use disk::{HEAD_SIZE, PrsHead, REC_SIZE, SpecDisk};
pub use edge::SpecEdge;
pub use prs::Prs;
