//! Component kind: product, assembly node or leaf detail
//! 组件类型：成品、装配节点或叶子零件

use std::fmt;

/// Component kind, stored as one byte on disk
/// 组件类型，磁盘上占一个字节
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
  /// Top-level product / 顶层成品
  Product = 0,
  /// Sub-assembly, may own a BOM / 子装配，可拥有 BOM
  Node = 1,
  /// Leaf part, never owns a BOM / 叶子零件，不可拥有 BOM
  Detail = 2,
}

impl Kind {
  #[inline(always)]
  pub fn as_u8(self) -> u8 {
    self as u8
  }

  /// Strict decode / 严格解码
  #[inline]
  pub fn try_from_u8(b: u8) -> Option<Self> {
    match b {
      0 => Some(Self::Product),
      1 => Some(Self::Node),
      2 => Some(Self::Detail),
      _ => None,
    }
  }

  /// Lenient decode, unknown bytes read as Detail
  /// 宽松解码，未知字节按 Detail 处理
  #[inline]
  pub fn from_u8(b: u8) -> Self {
    Self::try_from_u8(b).unwrap_or(Self::Detail)
  }

  /// Russian display name, the catalog's user-facing vocabulary
  /// 俄语显示名，目录面向用户的词汇
  pub fn name(self) -> &'static str {
    match self {
      Self::Product => "Изделие",
      Self::Node => "Узел",
      Self::Detail => "Деталь",
    }
  }

  /// Parse a Russian kind name, first letter either case
  /// 解析俄语类型名，首字母大小写均可
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "Изделие" | "изделие" => Some(Self::Product),
      "Узел" | "узел" => Some(Self::Node),
      "Деталь" | "деталь" => Some(Self::Detail),
      _ => None,
    }
  }

  /// May own a non-empty BOM / 是否可拥有非空 BOM
  #[inline(always)]
  pub fn has_bom(self) -> bool {
    !matches!(self, Self::Detail)
  }
}

impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
