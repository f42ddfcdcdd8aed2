//! `.prd` on-disk layout
//! `.prd` 磁盘布局
//!
//! ```text
//! header(28) | record | record | ...      record stride = 10 + max_name_len
//! ```
//!
//! All scalars little-endian; pointer fields hold byte offsets with
//! `NIL` (= 1) meaning "no pointer".
//! 所有标量为小端；指针字段存字节偏移，`NIL`（= 1）表示“无指针”。

use zerocopy::{
  FromBytes, Immutable, IntoBytes, KnownLayout,
  little_endian::{U16, U32},
};

/// File signature bytes / 文件签名字节
pub const SIG: [u8; 2] = *b"PS";

/// Width of the embedded spec file name / 内嵌规格文件名宽度
pub const SPEC_NAME_LEN: usize = 16;

/// Upper bound accepted for `max_name_len` / `max_name_len` 的上限
pub const MAX_NAME_CAP: u16 = 5000;

/// `.prd` file header (28 bytes)
/// `.prd` 文件头（28 字节）
///
/// | Field     | Size | Description                            |
/// |-----------|------|----------------------------------------|
/// | sig       | 2    | `'P' 'S'`                              |
/// | data_len  | 2    | 1 (kind byte) + max_name_len           |
/// | head_ptr  | 4    | first record of the alphabetical list  |
/// | free_ptr  | 4    | tail offset, next append position      |
/// | spec_name | 16   | paired `.prs` file name, space-padded  |
#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Clone, Copy, Debug)]
pub struct PrdHead {
  pub sig: [u8; 2],
  pub data_len: U16,
  pub head_ptr: U32,
  pub free_ptr: U32,
  pub spec_name: [u8; SPEC_NAME_LEN],
}

/// Header size / 文件头大小
pub const HEAD_SIZE: usize = size_of::<PrdHead>();

/// Fixed record prefix (10 bytes); the space-padded name of
/// `data_len - 1` bytes follows.
/// 定长记录前缀（10 字节）；其后为 `data_len - 1` 字节的空格填充名称。
///
/// | Field          | Size | Description                        |
/// |----------------|------|------------------------------------|
/// | deleted        | 1    | tombstone flag                     |
/// | first_spec_ptr | 4    | head of the owner's BOM chain      |
/// | next_ptr       | 4    | next record, alphabetical order    |
/// | kind           | 1    | component kind byte                |
#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Clone, Copy, Debug)]
pub struct RecHead {
  pub deleted: u8,
  pub first_spec_ptr: U32,
  pub next_ptr: U32,
  pub kind: u8,
}

/// Record prefix size / 记录前缀大小
pub const REC_FIXED: usize = size_of::<RecHead>();

const _: () = assert!(HEAD_SIZE == 28);
const _: () = assert!(REC_FIXED == 10);

/// Pad a spec file name to its fixed header width
/// 将规格文件名填充到文件头定宽
pub(crate) fn pad_spec_name(s: &str) -> [u8; SPEC_NAME_LEN] {
  let mut out = [b' '; SPEC_NAME_LEN];
  let bytes = s.as_bytes();
  let n = bytes.len().min(SPEC_NAME_LEN);
  out[..n].copy_from_slice(&bytes[..n]);
  out
}
