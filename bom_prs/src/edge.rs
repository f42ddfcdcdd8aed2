//! In-memory view of a BOM edge
//! BOM 边的内存视图

/// BOM edge read back from `.prs`; `offset` is the edge's durable
/// identifier, `component_ptr` points into the paired `.prd`.
/// 从 `.prs` 读回的 BOM 边；`offset` 是其持久标识，
/// `component_ptr` 指向配对的 `.prd`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecEdge {
  pub deleted: bool,
  pub component_ptr: u32,
  pub qty: u16,
  pub next_ptr: u32,
  pub offset: u32,
}
