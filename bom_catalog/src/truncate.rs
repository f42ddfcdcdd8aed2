//! Offline compaction: rewrite both files from the live subset
//! 离线压缩：从存活子集重写两个文件

use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use bom_base::{Kind, NIL, Result};
use bom_prd::{ComponentRec, Prd};
use bom_prs::Prs;

use crate::catalog::{Catalog, Store};

/// `x.prd` -> `x.prd.tmp`
fn tmp_path(p: &Path) -> PathBuf {
  let mut s = p.as_os_str().to_owned();
  s.push(".tmp");
  PathBuf::from(s)
}

impl Catalog {
  /// Compact the pair: drop tombstones, remap cross-file pointers,
  /// swap the rebuilt files over the old ones and reopen. Not
  /// crash-safe between the two renames.
  /// 压缩文件对：清除墓碑、重映射跨文件指针、用重建文件替换旧文件并
  /// 重新打开。两次改名之间不具备崩溃安全性。
  pub fn truncate(&mut self) -> Result<()> {
    self.rebuild_files()?;
    self.store_mut()?.prd.rebuild_links()
  }

  fn rebuild_files(&mut self) -> Result<()> {
    let st = self.store_mut()?;

    let prd_old = st.prd.prd_path().to_path_buf();
    let prs_old = st.prs.prs_path().to_path_buf();
    let prs_name = st.prd.prs_path().to_owned();
    let max_name_len = st.prd.max_name_len();

    let prd_tmp = tmp_path(&prd_old);
    let prs_tmp = tmp_path(&prs_old);

    let active: Vec<ComponentRec> = st
      .prd
      .read_all()?
      .into_iter()
      .filter(|c| !c.deleted)
      .collect();

    let tmp_name = prs_tmp
      .file_name()
      .and_then(|n| n.to_str())
      .unwrap_or_default();
    let mut new_prd = Prd::create(&prd_tmp, max_name_len, tmp_name)?;
    let mut new_prs = Prs::create(&prs_tmp)?;

    // Survivors keep their file order; offsets change, so record the
    // mapping for the edge pass.
    // 存活记录保持文件顺序；偏移会变化，为边重写记录映射。
    let mut remap: HashMap<u32, u32> = HashMap::new();
    for c in &active {
      let appended = new_prd.add(&c.name, c.kind)?;
      remap.insert(c.offset, appended.offset);
    }

    for c in &active {
      if c.kind == Kind::Detail {
        continue;
      }

      let mut new_first = NIL;
      let mut new_prev = NIL;

      let mut cur = c.first_spec_ptr;
      while cur != NIL {
        let e = st.prs.read_at(cur)?;
        cur = e.next_ptr;

        if e.deleted {
          continue;
        }
        // Unmapped referent = edge of a tombstoned component, dangling
        // 未映射的引用 = 指向墓碑组件的悬挂边
        let Some(&mapped) = remap.get(&e.component_ptr) else {
          continue;
        };

        let new_off = new_prs.add(mapped, e.qty)?;
        if new_first == NIL {
          new_first = new_off;
        } else {
          new_prs.update_next(new_prev, new_off)?;
        }
        new_prev = new_off;
      }

      let Some(&new_owner_off) = remap.get(&c.offset) else {
        continue;
      };
      let new_owner = new_prd.read_at(new_owner_off)?;
      new_prd.update_ptrs(new_owner.offset, new_first, new_owner.next_ptr)?;
    }

    // Swap: close everything, replace the old pair, reopen. The `.prd`
    // is renamed first; a crash here leaves the pair inconsistent.
    // 替换：关闭全部文件，替换旧文件对并重新打开。先改名 `.prd`；
    // 此处崩溃会使文件对不一致。
    drop(new_prd);
    drop(new_prs);
    self.store = None;

    fs::remove_file(&prd_old)?;
    fs::remove_file(&prs_old)?;
    fs::rename(&prd_tmp, &prd_old)?;
    fs::rename(&prs_tmp, &prs_old)?;

    let mut prd = Prd::open(&prd_old)?;
    // The rebuilt header still names the temp spec file; point it back
    // at the final path so a later open resolves the pair.
    // 重建的文件头仍记录临时规格文件名；改回最终路径以便后续打开。
    prd.set_spec_path(&prs_name)?;
    let prs = Prs::open(&prs_old)?;
    self.store = Some(Store { prd, prs });

    log::info!(
      "truncate: {} live components, {} -> {}",
      active.len(),
      prd_tmp.display(),
      prd_old.display()
    );
    Ok(())
  }
}
