#![cfg_attr(docsrs, feature(doc_cfg))]

//! bom_base - Shared types for the component catalog
//! bom_base - 组件目录的共享类型

mod error;
mod kind;
mod name;

pub use error::{Error, Result};
pub use kind::Kind;
pub use name::trim;

/// Null pointer sentinel in both catalog files.
/// Zero is a valid interior byte, so offsets use 1 as "no pointer".
/// 两个目录文件中的空指针哨兵。0 可能是合法的内部字节，因此用 1 表示“无指针”。
pub const NIL: u32 = 1;
