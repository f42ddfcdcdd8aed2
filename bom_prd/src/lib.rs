#![cfg_attr(docsrs, feature(doc_cfg))]

//! bom_prd - Component store over the `.prd` file
//! bom_prd - 基于 `.prd` 文件的组件存储

mod disk;
mod prd;
mod rec;

pub use disk::{HEAD_SIZE, MAX_NAME_CAP, PrdHead, REC_FIXED, RecHead, SIG, SPEC_NAME_LEN};
pub use prd::Prd;
pub use rec::ComponentRec;
