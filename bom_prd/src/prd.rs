//! Component store: header, record CRUD, alphabetical intrusive list
//! 组件存储：文件头、记录增删改查、按字母序的侵入式链表

use std::{
  mem::offset_of,
  path::{Path, PathBuf},
};

use bom_base::{Error, Kind, NIL, Result, trim};
use bom_fs::BinFile;
use zerocopy::{
  FromBytes, IntoBytes,
  little_endian::{U16, U32},
};

use crate::{
  disk::{HEAD_SIZE, MAX_NAME_CAP, PrdHead, REC_FIXED, RecHead, SIG, pad_spec_name},
  rec::ComponentRec,
};

/// Component store over one `.prd` file
/// 基于单个 `.prd` 文件的组件存储
pub struct Prd {
  file: BinFile,
  head: PrdHead,
  prd_path: PathBuf,
  prs_path: String,
}

impl Prd {
  /// Create a fresh `.prd`, truncating any existing file.
  /// `free_ptr` is written as a placeholder first and rewritten to the
  /// actual tail once the header is on disk.
  /// 创建新的 `.prd`，截断已有文件。`free_ptr` 先写占位值，
  /// 头部落盘后再改写为实际尾部偏移。
  pub fn create(prd_path: impl Into<PathBuf>, max_name_len: u16, prs_path: &str) -> Result<Self> {
    if max_name_len == 0 || max_name_len > MAX_NAME_CAP {
      return Err(Error::validation(
        "Некорректная максимальная длина имени компонента.",
      ));
    }

    let prd_path = prd_path.into();
    let mut file = BinFile::create_rw(&prd_path)?;

    let mut head = PrdHead {
      sig: SIG,
      data_len: U16::new(1 + max_name_len),
      head_ptr: U32::new(NIL),
      free_ptr: U32::new(0),
      spec_name: pad_spec_name(prs_path),
    };
    file.seek(0)?;
    file.write_bytes(head.as_bytes())?;

    head.free_ptr = U32::new(file.tell()? as u32);
    file.seek(offset_of!(PrdHead, free_ptr) as u64)?;
    file.write_u32(head.free_ptr.get())?;
    file.flush()?;

    log::debug!(
      "prd created: {}, max_name_len={max_name_len}, prs={prs_path}",
      prd_path.display()
    );

    Ok(Self {
      file,
      head,
      prd_path,
      prs_path: prs_path.to_owned(),
    })
  }

  /// Open an existing `.prd` and validate its header
  /// 打开已有 `.prd` 并校验文件头
  pub fn open(prd_path: impl Into<PathBuf>) -> Result<Self> {
    let prd_path = prd_path.into();
    let mut file = BinFile::open_rw(&prd_path)?;

    file.seek(0)?;
    let mut buf = [0u8; HEAD_SIZE];
    file.read_bytes(&mut buf)?;
    let head = PrdHead::read_from_bytes(&buf)
      .map_err(|_| Error::format("Некорректный заголовок файла компонентов."))?;

    if head.sig != SIG {
      return Err(Error::format(
        "Сигнатура файла отсутствует или неверна (ожидалось 'PS').",
      ));
    }
    if head.data_len.get() < 2 {
      return Err(Error::format(
        "Некорректная длина области данных (dataLen) в заголовке.",
      ));
    }

    let prs_path = trim(&String::from_utf8_lossy(&head.spec_name)).to_owned();
    log::debug!("prd opened: {}, prs={prs_path}", prd_path.display());

    Ok(Self {
      file,
      head,
      prd_path,
      prs_path,
    })
  }

  #[inline(always)]
  pub fn max_name_len(&self) -> u16 {
    self.head.data_len.get() - 1
  }

  #[inline(always)]
  pub fn head_ptr(&self) -> u32 {
    self.head.head_ptr.get()
  }

  #[inline(always)]
  pub fn free_ptr(&self) -> u32 {
    self.head.free_ptr.get()
  }

  #[inline(always)]
  pub fn prd_path(&self) -> &Path {
    &self.prd_path
  }

  /// Paired `.prs` file name from the header, trimmed
  /// 文件头中配对的 `.prs` 文件名，已裁剪
  #[inline(always)]
  pub fn prs_path(&self) -> &str {
    &self.prs_path
  }

  /// Record stride: fixed prefix + name area
  /// 记录步长：定长前缀 + 名称区
  #[inline(always)]
  pub fn rec_size(&self) -> u64 {
    (REC_FIXED + self.max_name_len() as usize) as u64
  }

  fn write_head(&mut self) -> Result<()> {
    self.file.seek(0)?;
    self.file.write_bytes(self.head.as_bytes())
  }

  fn write_at(&mut self, offset: u32, rec: &ComponentRec) -> Result<()> {
    let rh = RecHead {
      deleted: rec.deleted as u8,
      first_spec_ptr: U32::new(rec.first_spec_ptr),
      next_ptr: U32::new(rec.next_ptr),
      kind: rec.kind.as_u8(),
    };
    self.file.seek(offset as u64)?;
    self.file.write_bytes(rh.as_bytes())?;
    self
      .file
      .write_fixed_str(&rec.name, self.max_name_len() as usize, b' ')
  }

  /// Read the record at `offset`; the returned view carries `offset`
  /// 读取 `offset` 处的记录；返回视图携带 `offset`
  pub fn read_at(&mut self, offset: u32) -> Result<ComponentRec> {
    self.file.seek(offset as u64)?;
    let mut buf = [0u8; REC_FIXED];
    self.file.read_bytes(&mut buf)?;
    let rh = RecHead::read_from_bytes(&buf)
      .map_err(|_| Error::format("Некорректная запись компонента."))?;
    let name = self.file.read_fixed_str(self.max_name_len() as usize)?;

    Ok(ComponentRec {
      deleted: rh.deleted != 0,
      first_spec_ptr: rh.first_spec_ptr.get(),
      next_ptr: rh.next_ptr.get(),
      kind: Kind::from_u8(rh.kind),
      name: trim(&name).to_owned(),
      offset,
    })
  }

  /// Every physically present record in file order, tombstones included
  /// 按文件顺序返回所有物理存在的记录，含墓碑
  pub fn read_all(&mut self) -> Result<Vec<ComponentRec>> {
    let mut out = Vec::new();
    let sz = self.file.size()?;
    let step = self.rec_size();
    let mut pos = HEAD_SIZE as u64;

    while pos + step <= sz {
      out.push(self.read_at(pos as u32)?);
      pos += step;
    }
    Ok(out)
  }

  /// First live record whose trimmed name equals the trimmed query
  /// 第一个名称（裁剪后）与查询相等的存活记录
  pub fn find_active(&mut self, name: &str) -> Result<Option<ComponentRec>> {
    let target = trim(name);
    for r in self.read_all()? {
      if !r.deleted && r.name == target {
        return Ok(Some(r));
      }
    }
    Ok(None)
  }

  fn append(&mut self, rec: &ComponentRec) -> Result<u32> {
    let offset = self.file.size()? as u32;
    self.write_at(offset, rec)?;
    self.head.free_ptr = U32::new(self.file.size()? as u32);
    self.write_head()?;
    self.file.flush()?;
    Ok(offset)
  }

  /// Append a component and splice it into the alphabetical list.
  /// The walk traverses tombstoned records without comparing their
  /// names; exactly one predecessor link (or the head) is rewritten.
  /// 追加组件并接入字母序链表。遍历时跳过墓碑记录的名称比较；
  /// 只改写一个前驱链接（或表头）。
  pub fn add(&mut self, name: &str, kind: Kind) -> Result<ComponentRec> {
    let nm = trim(name);
    if nm.is_empty() {
      return Err(Error::validation("Пустое имя компонента."));
    }
    if nm.len() > self.max_name_len() as usize {
      return Err(Error::validation(
        "Имя компонента длиннее maxNameLen (Create).",
      ));
    }
    if self.find_active(nm)?.is_some() {
      return Err(Error::validation("Дублирование имен компонентов."));
    }

    let mut new_rec = ComponentRec {
      deleted: false,
      first_spec_ptr: NIL,
      next_ptr: NIL,
      kind,
      name: nm.to_owned(),
      offset: 0,
    };

    let new_offset = self.append(&new_rec)?;
    new_rec.offset = new_offset;

    if self.head.head_ptr.get() == NIL {
      self.head.head_ptr = U32::new(new_offset);
      self.write_head()?;
      self.file.flush()?;
      return Ok(new_rec);
    }

    let mut prev = NIL;
    let mut cur = self.head.head_ptr.get();

    while cur != NIL {
      let cur_rec = self.read_at(cur)?;
      if !cur_rec.deleted && cur_rec.name.as_str() > nm {
        break;
      }
      prev = cur;
      cur = cur_rec.next_ptr;
    }

    if prev == NIL {
      new_rec.next_ptr = self.head.head_ptr.get();
      self.write_at(new_offset, &new_rec)?;
      self.head.head_ptr = U32::new(new_offset);
      self.write_head()?;
      self.file.flush()?;
      return Ok(new_rec);
    }

    let mut prev_rec = self.read_at(prev)?;
    new_rec.next_ptr = cur;
    self.write_at(new_offset, &new_rec)?;
    prev_rec.next_ptr = new_offset;
    self.write_at(prev, &prev_rec)?;
    self.file.flush()?;
    Ok(new_rec)
  }

  /// Set or clear the tombstone flag in place; pointers untouched
  /// 原地设置或清除墓碑标志；指针不变
  pub fn mark_deleted(&mut self, offset: u32, deleted: bool) -> Result<()> {
    let mut r = self.read_at(offset)?;
    r.deleted = deleted;
    self.write_at(offset, &r)?;
    self.file.flush()
  }

  /// In-place pointer update / 原地更新指针
  pub fn update_ptrs(&mut self, offset: u32, first_spec_ptr: u32, next_ptr: u32) -> Result<()> {
    let mut r = self.read_at(offset)?;
    r.first_spec_ptr = first_spec_ptr;
    r.next_ptr = next_ptr;
    self.write_at(offset, &r)?;
    self.file.flush()
  }

  /// Rewrite name and kind only; list order is the caller's concern
  /// (`rebuild_links` after a rename).
  /// 仅改写名称与类型；链表顺序由调用方负责（改名后需 `rebuild_links`）。
  pub fn update(&mut self, offset: u32, name: &str, kind: Kind) -> Result<()> {
    let mut r = self.read_at(offset)?;
    r.name = trim(name).to_owned();
    r.kind = kind;
    self.write_at(offset, &r)?;
    self.file.flush()
  }

  /// Sort live records by byte-wise name and rewrite the whole chain,
  /// head pointer and tail pointer. `first_spec_ptr` values survive.
  /// 按字节序排序存活记录并重写整条链、表头与尾指针。
  /// `first_spec_ptr` 保持不变。
  pub fn rebuild_links(&mut self) -> Result<()> {
    let mut active: Vec<ComponentRec> =
      self.read_all()?.into_iter().filter(|r| !r.deleted).collect();
    active.sort_by(|a, b| a.name.cmp(&b.name));

    for i in 0..active.len() {
      let next = if i + 1 < active.len() {
        active[i + 1].offset
      } else {
        NIL
      };
      self.update_ptrs(active[i].offset, active[i].first_spec_ptr, next)?;
    }

    self.head.head_ptr = U32::new(match active.first() {
      Some(r) => r.offset,
      None => NIL,
    });
    self.head.free_ptr = U32::new(self.file.size()? as u32);
    self.write_head()?;
    self.file.flush()
  }

  /// Rewrite the paired `.prs` name embedded in the header.
  /// Compaction re-points the rebuilt file at its final path.
  /// 改写文件头内嵌的 `.prs` 名称。压缩后将重建文件指回最终路径。
  pub fn set_spec_path(&mut self, prs_path: &str) -> Result<()> {
    self.head.spec_name = pad_spec_name(prs_path);
    self.prs_path = trim(prs_path).to_owned();
    self.write_head()?;
    self.file.flush()
  }
}
