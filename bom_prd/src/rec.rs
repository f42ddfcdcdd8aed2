//! In-memory view of a component record
//! 组件记录的内存视图

use bom_base::Kind;

/// Component record read back from `.prd`; `name` is trimmed,
/// `offset` is the record's durable identifier.
/// 从 `.prd` 读回的组件记录；`name` 已裁剪，`offset` 是记录的持久标识。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRec {
  pub deleted: bool,
  pub first_spec_ptr: u32,
  pub next_ptr: u32,
  pub kind: Kind,
  pub name: String,
  pub offset: u32,
}
