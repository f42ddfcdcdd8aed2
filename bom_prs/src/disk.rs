//! `.prs` on-disk layout
//! `.prs` 磁盘布局
//!
//! ```text
//! header(8) | record(11) | record(11) | ...
//! ```

use zerocopy::{
  FromBytes, Immutable, IntoBytes, KnownLayout,
  little_endian::{U16, U32},
};

/// `.prs` file header (8 bytes)
/// `.prs` 文件头（8 字节）
///
/// `head_ptr` is reserved: written on create, read back, never
/// consulted. Kept for format symmetry with `.prd`.
/// `head_ptr` 为保留字段：创建时写入、读回但从不使用，
/// 仅为与 `.prd` 格式对称而保留。
#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Clone, Copy, Debug)]
pub struct PrsHead {
  pub head_ptr: U32,
  pub free_ptr: U32,
}

/// Header size / 文件头大小
pub const HEAD_SIZE: usize = size_of::<PrsHead>();

/// One BOM edge on disk (11 bytes, the whole record)
/// 磁盘上的一条 BOM 边（11 字节，即完整记录）
///
/// | Field         | Size | Description                          |
/// |---------------|------|--------------------------------------|
/// | deleted       | 1    | tombstone flag                       |
/// | component_ptr | 4    | `.prd` offset of the referenced part |
/// | qty           | 2    | quantity, at least 1                 |
/// | next_ptr      | 4    | next edge of the same owner          |
#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Clone, Copy, Debug)]
pub struct SpecDisk {
  pub deleted: u8,
  pub component_ptr: U32,
  pub qty: U16,
  pub next_ptr: U32,
}

/// Record size / 记录大小
pub const REC_SIZE: usize = size_of::<SpecDisk>();

const _: () = assert!(HEAD_SIZE == 8);
const _: () = assert!(REC_SIZE == 11);
