//! Joined views returned by catalog queries
//! 目录查询返回的联结视图

use bom_base::Kind;

/// One BOM line: referenced part joined with its quantity
/// 一行 BOM：被引用零件与其数量的联结
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecItemView {
  pub name: String,
  pub kind: Kind,
  pub qty: u16,
}
