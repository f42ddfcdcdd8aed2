//! Catalog service: file pair lifecycle and component operations
//! 目录服务：文件对生命周期与组件操作

use std::path::{Path, PathBuf};

use bom_base::{Error, Kind, NIL, Result, trim};
use bom_prd::{ComponentRec, Prd};
use bom_prs::Prs;

/// The open `.prd`/`.prs` pair, exclusively owned
/// 独占持有的已打开 `.prd`/`.prs` 文件对
pub(crate) struct Store {
  pub prd: Prd,
  pub prs: Prs,
}

/// User-facing catalog of components and their BOMs
/// 面向用户的组件与 BOM 目录
#[derive(Default)]
pub struct Catalog {
  pub(crate) store: Option<Store>,
}

/// Append `ext` unless `base` already ends with it
/// 若 `base` 尚无 `ext` 后缀则追加
pub(crate) fn ensure_ext(base: &str, ext: &str) -> String {
  if base.ends_with(ext) {
    base.to_owned()
  } else {
    format!("{base}{ext}")
  }
}

/// Last path component; the 16-byte header field holds a file name,
/// the pair always lives side-by-side.
/// 路径末段；16 字节头部字段只存文件名，文件对总是并排存放。
pub(crate) fn file_name(path: &str) -> &str {
  Path::new(path)
    .file_name()
    .and_then(|n| n.to_str())
    .unwrap_or(path)
}

impl Catalog {
  pub const fn new() -> Self {
    Self { store: None }
  }

  #[inline(always)]
  pub fn is_open(&self) -> bool {
    self.store.is_some()
  }

  pub(crate) fn store_mut(&mut self) -> Result<&mut Store> {
    self
      .store
      .as_mut()
      .ok_or_else(|| Error::validation("Файлы не открыты. Выполните Create или Open."))
  }

  /// Create a fresh pair. The `.prs` file name defaults to the base
  /// name; its name (last path component) is embedded into the `.prd`
  /// header.
  /// 创建新的文件对。`.prs` 文件名默认取基础名，其文件名（路径末段）
  /// 内嵌到 `.prd` 文件头。
  pub fn create(
    &mut self,
    base: &str,
    max_name_len: u16,
    prs_override: Option<&str>,
  ) -> Result<()> {
    let prd_path = ensure_ext(base, ".prd");
    let prs_path = match prs_override {
      Some(p) => ensure_ext(p, ".prs"),
      None => ensure_ext(base, ".prs"),
    };

    let prd = Prd::create(prd_path, max_name_len, file_name(&prs_path))?;
    let prs = Prs::create(prs_path)?;
    self.store = Some(Store { prd, prs });
    Ok(())
  }

  /// Open an existing pair. The `.prs` name recorded in the `.prd`
  /// header resolves next to the `.prd` itself; a blank header falls
  /// back to the base name.
  /// 打开已有文件对。`.prd` 文件头记录的 `.prs` 名称在 `.prd` 同目录
  /// 解析；头部为空则回退到基础名。
  pub fn open(&mut self, base: &str) -> Result<()> {
    let prd_path = ensure_ext(base, ".prd");
    let prd = Prd::open(&*prd_path)?;

    let embedded = prd.prs_path();
    let prs_path: PathBuf = if embedded.is_empty() {
      ensure_ext(base, ".prs").into()
    } else {
      match Path::new(&prd_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(embedded),
        _ => embedded.into(),
      }
    };

    let prs = Prs::open(prs_path)?;
    self.store = Some(Store { prd, prs });
    Ok(())
  }

  /// Close both files / 关闭两个文件
  pub fn close(&mut self) {
    self.store = None;
  }

  pub fn input_component(&mut self, name: &str, kind: Kind) -> Result<()> {
    let st = self.store_mut()?;
    st.prd.add(name, kind)?;
    Ok(())
  }

  /// Rename and/or retype a live component. A rename re-checks
  /// uniqueness and normalizes the alphabetical list afterwards.
  /// 重命名或改类型。改名会复查唯一性，随后归一化字母序链表。
  pub fn update_component(&mut self, old_name: &str, new_name: &str, kind: Kind) -> Result<()> {
    let st = self.store_mut()?;

    let old_rec = st
      .prd
      .find_active(old_name)?
      .ok_or_else(|| Error::validation("Компонент не найден."))?;

    let nm = trim(new_name);
    if nm.is_empty() {
      return Err(Error::validation("Пустое имя компонента."));
    }
    if nm.len() > st.prd.max_name_len() as usize {
      return Err(Error::validation(
        "Имя компонента длиннее maxNameLen (Create).",
      ));
    }

    if old_rec.name != nm && st.prd.find_active(nm)?.is_some() {
      return Err(Error::validation("Дублирование имен компонентов."));
    }

    st.prd.update(old_rec.offset, nm, kind)?;
    st.prd.rebuild_links()
  }

  /// Tombstone a component. Refused while any live BOM edge anywhere
  /// references it; the alphabetical list is not relinked, live-only
  /// walks skip the tombstone.
  /// 给组件打墓碑。任何存活 BOM 边引用它时拒绝删除；
  /// 不重链字母序链表，只读遍历会跳过墓碑。
  pub fn delete_component(&mut self, name: &str) -> Result<()> {
    let st = self.store_mut()?;

    let rec = st
      .prd
      .find_active(name)?
      .ok_or_else(|| Error::validation("Компонент не найден."))?;

    if st.prs.has_ref(rec.offset)? {
      return Err(Error::validation(
        "Невозможно удалить: на компонент есть ссылки в спецификациях других компонент.",
      ));
    }

    st.prd.mark_deleted(rec.offset, true)
  }

  /// Clear the tombstone on every record carrying this name, then
  /// normalize the list. Fails when no record (live or not) matches.
  /// 清除所有同名记录的墓碑，然后归一化链表。无任何匹配记录时失败。
  pub fn restore_component(&mut self, name: &str) -> Result<()> {
    let st = self.store_mut()?;

    let mut found = false;
    for r in st.prd.read_all()? {
      if r.name == name {
        found = true;
        if r.deleted {
          st.prd.mark_deleted(r.offset, false)?;
        }
      }
    }
    if !found {
      return Err(Error::validation("Компонент не найден."));
    }
    st.prd.rebuild_links()
  }

  /// Clear every component tombstone. BOM edges are never auto-restored.
  /// 清除所有组件墓碑。BOM 边不会自动恢复。
  pub fn restore_all(&mut self) -> Result<()> {
    let st = self.store_mut()?;

    for r in st.prd.read_all()? {
      if r.deleted {
        st.prd.mark_deleted(r.offset, false)?;
      }
    }
    st.prd.rebuild_links()
  }

  /// Live components in alphabetical chain order
  /// 按字母序链表顺序返回存活组件
  pub fn list_components(&mut self) -> Result<Vec<ComponentRec>> {
    let st = self.store_mut()?;

    let mut out = Vec::new();
    let mut cur = st.prd.head_ptr();
    while cur != NIL {
      let r = st.prd.read_at(cur)?;
      let next = r.next_ptr;
      if !r.deleted {
        out.push(r);
      }
      cur = next;
    }
    Ok(out)
  }

  /// Command reference of the console front-end
  /// 控制台前端的命令参考
  pub fn help_text(&self) -> &'static str {
    HELP
  }
}

const HELP: &str = "Команды:
  Create имяФайла(максДлинаИмени[, имяФайлаСпецификаций])
  Create имяФайла максДлина [имяФайлаСпецификаций]
  Open имяФайла
  Input(имяКомпонента, тип)                 // тип: Изделие | Узел | Деталь
  Input(имяКомпонента/имяКомплектующего[, qty])
  Delete(имяКомпонента)
  Delete(имяКомпонента/имяКомплектующего)
  Restore(имяКомпонента)
  Restore(*)
  Truncate
  Print(имяКомпонента)
  Print(*)
  Help [имяФайла]
  Exit
";
