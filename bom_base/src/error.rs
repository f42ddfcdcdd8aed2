//! Error types for the catalog stores
//! 目录存储的错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  /// Disk read/write/positioning failure
  /// 磁盘读写或定位失败
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  /// On-disk data violates the file format
  /// 磁盘数据违反文件格式
  #[error("{0}")]
  Format(Box<str>),

  /// Caller-visible rule violation
  /// 调用方可见的规则违反
  #[error("{0}")]
  Validation(Box<str>),
}

impl Error {
  /// Create Format error / 创建 Format 错误
  #[inline]
  pub fn format(msg: impl Into<Box<str>>) -> Self {
    Self::Format(msg.into())
  }

  /// Create Validation error / 创建 Validation 错误
  #[inline]
  pub fn validation(msg: impl Into<Box<str>>) -> Self {
    Self::Validation(msg.into())
  }

  #[inline(always)]
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::Validation(_))
  }

  #[inline(always)]
  pub fn is_format(&self) -> bool {
    matches!(self, Self::Format(_))
  }
}
