//! Specification store: per-owner BOM chains with tombstones
//! 规格存储：带墓碑的按所有者 BOM 链

use std::path::{Path, PathBuf};

use bom_base::{Error, NIL, Result};
use bom_fs::BinFile;
use zerocopy::{
  FromBytes, IntoBytes,
  little_endian::{U16, U32},
};

use crate::{
  disk::{HEAD_SIZE, PrsHead, REC_SIZE, SpecDisk},
  edge::SpecEdge,
};

/// BOM-edge store over one `.prs` file
/// 基于单个 `.prs` 文件的 BOM 边存储
pub struct Prs {
  file: BinFile,
  head: PrsHead,
  prs_path: PathBuf,
}

impl Prs {
  /// Create a fresh `.prs`, truncating any existing file
  /// 创建新的 `.prs`，截断已有文件
  pub fn create(prs_path: impl Into<PathBuf>) -> Result<Self> {
    let prs_path = prs_path.into();
    let mut file = BinFile::create_rw(&prs_path)?;

    let head = PrsHead {
      head_ptr: U32::new(NIL),
      free_ptr: U32::new(HEAD_SIZE as u32),
    };
    file.seek(0)?;
    file.write_bytes(head.as_bytes())?;
    file.flush()?;

    log::debug!("prs created: {}", prs_path.display());
    Ok(Self {
      file,
      head,
      prs_path,
    })
  }

  /// Open an existing `.prs` / 打开已有 `.prs`
  pub fn open(prs_path: impl Into<PathBuf>) -> Result<Self> {
    let prs_path = prs_path.into();
    let mut file = BinFile::open_rw(&prs_path)?;

    file.seek(0)?;
    let mut buf = [0u8; HEAD_SIZE];
    file.read_bytes(&mut buf)?;
    let head = PrsHead::read_from_bytes(&buf)
      .map_err(|_| Error::format("Некорректный заголовок файла спецификаций."))?;

    log::debug!("prs opened: {}", prs_path.display());
    Ok(Self {
      file,
      head,
      prs_path,
    })
  }

  #[inline(always)]
  pub fn prs_path(&self) -> &Path {
    &self.prs_path
  }

  #[inline(always)]
  pub fn free_ptr(&self) -> u32 {
    self.head.free_ptr.get()
  }

  fn write_head(&mut self) -> Result<()> {
    self.file.seek(0)?;
    self.file.write_bytes(self.head.as_bytes())
  }

  fn write_at(&mut self, offset: u32, edge: &SpecEdge) -> Result<()> {
    let disk = SpecDisk {
      deleted: edge.deleted as u8,
      component_ptr: U32::new(edge.component_ptr),
      qty: U16::new(edge.qty),
      next_ptr: U32::new(edge.next_ptr),
    };
    self.file.seek(offset as u64)?;
    self.file.write_bytes(disk.as_bytes())
  }

  /// Read the edge at `offset` / 读取 `offset` 处的边
  pub fn read_at(&mut self, offset: u32) -> Result<SpecEdge> {
    self.file.seek(offset as u64)?;
    let mut buf = [0u8; REC_SIZE];
    self.file.read_bytes(&mut buf)?;
    let disk = SpecDisk::read_from_bytes(&buf)
      .map_err(|_| Error::format("Некорректная запись спецификации."))?;

    Ok(SpecEdge {
      deleted: disk.deleted != 0,
      component_ptr: disk.component_ptr.get(),
      qty: disk.qty.get(),
      next_ptr: disk.next_ptr.get(),
      offset,
    })
  }

  /// Every physically present edge in file order, tombstones included
  /// 按文件顺序返回所有物理存在的边，含墓碑
  pub fn read_all(&mut self) -> Result<Vec<SpecEdge>> {
    let mut out = Vec::new();
    let sz = self.file.size()?;
    let step = REC_SIZE as u64;
    let mut pos = HEAD_SIZE as u64;

    while pos + step <= sz {
      out.push(self.read_at(pos as u32)?);
      pos += step;
    }
    Ok(out)
  }

  /// Append a new unlinked edge; chain maintenance is the caller's job.
  /// Returns the edge's offset.
  /// 追加一条未接链的新边；接链由调用方负责。返回该边的偏移。
  pub fn add(&mut self, component_ptr: u32, qty: u16) -> Result<u32> {
    let edge = SpecEdge {
      deleted: false,
      component_ptr,
      qty,
      next_ptr: NIL,
      offset: 0,
    };

    let offset = self.file.size()? as u32;
    self.write_at(offset, &edge)?;
    self.head.free_ptr = U32::new(self.file.size()? as u32);
    self.write_head()?;
    self.file.flush()?;
    Ok(offset)
  }

  /// Set or clear the tombstone flag in place
  /// 原地设置或清除墓碑标志
  pub fn mark_deleted(&mut self, offset: u32, deleted: bool) -> Result<()> {
    let mut e = self.read_at(offset)?;
    e.deleted = deleted;
    self.write_at(offset, &e)?;
    self.file.flush()
  }

  /// In-place `next_ptr` update / 原地更新 `next_ptr`
  pub fn update_next(&mut self, offset: u32, next_ptr: u32) -> Result<()> {
    let mut e = self.read_at(offset)?;
    e.next_ptr = next_ptr;
    self.write_at(offset, &e)?;
    self.file.flush()
  }

  /// Relink a chain without its tombstones and return the new head.
  /// Edges never move on disk, only `next_ptr` fields are rewritten.
  /// 重链一条链并剔除墓碑，返回新表头。边不会在磁盘上移动，
  /// 只改写 `next_ptr` 字段。
  pub fn rebuild_chain(&mut self, first_spec_ptr: u32) -> Result<u32> {
    if first_spec_ptr == NIL {
      return Ok(NIL);
    }

    let mut chain = Vec::new();
    let mut cur = first_spec_ptr;
    while cur != NIL {
      let e = self.read_at(cur)?;
      if !e.deleted {
        chain.push(e);
      }
      cur = e.next_ptr;
    }

    for i in 0..chain.len() {
      let next = if i + 1 < chain.len() {
        chain[i + 1].offset
      } else {
        NIL
      };
      self.update_next(chain[i].offset, next)?;
    }

    Ok(match chain.first() {
      Some(e) => e.offset,
      None => NIL,
    })
  }

  /// True when any live edge anywhere references the component offset
  /// 当任意存活边引用该组件偏移时为真
  pub fn has_ref(&mut self, component_ptr: u32) -> Result<bool> {
    for e in self.read_all()? {
      if !e.deleted && e.component_ptr == component_ptr {
        return Ok(true);
      }
    }
    Ok(false)
  }
}
