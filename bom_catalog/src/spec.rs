//! BOM edge operations: append, delete with relink, listing
//! BOM 边操作：追加、删除并重链、列出

use bom_base::{Error, Kind, NIL, Result};
use bom_prs::SpecEdge;

use crate::{
  catalog::{Catalog, Store},
  view::SpecItemView,
};

impl Store {
  /// Live edges of a chain in link order
  /// 按链接顺序返回链上的存活边
  pub(crate) fn read_chain(&mut self, first_spec_ptr: u32) -> Result<Vec<SpecEdge>> {
    let mut out = Vec::new();
    let mut cur = first_spec_ptr;
    while cur != NIL {
      let e = self.prs.read_at(cur)?;
      if !e.deleted {
        out.push(e);
      }
      cur = e.next_ptr;
    }
    Ok(out)
  }
}

impl Catalog {
  /// Append one BOM edge `owner -> part` with the given quantity.
  /// The new edge goes to the tail of the owner's chain; the tail walk
  /// follows `next_ptr` through tombstones.
  /// 追加一条 `owner -> part` 的 BOM 边。新边接到所有者链尾；
  /// 找尾时沿 `next_ptr` 穿过墓碑。
  pub fn input_spec_item(&mut self, owner_name: &str, part_name: &str, qty: u16) -> Result<()> {
    if qty == 0 {
      return Err(Error::validation("Количество должно быть не меньше 1."));
    }

    let st = self.store_mut()?;

    let owner = st
      .prd
      .find_active(owner_name)?
      .ok_or_else(|| Error::validation("Компонент-родитель не найден."))?;

    let part = st
      .prd
      .find_active(part_name)?
      .ok_or_else(|| Error::validation("Комплектующее отсутствует в списке компонентов."))?;

    if owner.kind == Kind::Detail {
      return Err(Error::validation("Для детали нельзя добавлять спецификацию."));
    }
    if owner.offset == part.offset {
      return Err(Error::validation(
        "Компонент не может входить в собственную спецификацию.",
      ));
    }

    let new_off = st.prs.add(part.offset, qty)?;

    if owner.first_spec_ptr == NIL {
      return st.prd.update_ptrs(owner.offset, new_off, owner.next_ptr);
    }

    let mut cur = owner.first_spec_ptr;
    loop {
      let e = st.prs.read_at(cur)?;
      if e.next_ptr == NIL {
        return st.prs.update_next(cur, new_off);
      }
      cur = e.next_ptr;
    }
  }

  /// Tombstone the first live edge of the owner's chain whose referent
  /// carries `part_name`, then relink the chain without tombstones and
  /// re-point the owner's chain head.
  /// 给所有者链上第一条引用 `part_name` 的存活边打墓碑，
  /// 随后重链剔除墓碑并更新所有者的链头。
  pub fn delete_spec_item(&mut self, owner_name: &str, part_name: &str) -> Result<()> {
    let st = self.store_mut()?;

    let owner = st
      .prd
      .find_active(owner_name)?
      .ok_or_else(|| Error::validation("Компонент-родитель не найден."))?;

    if owner.kind == Kind::Detail {
      return Err(Error::validation("У детали нет спецификации."));
    }
    if owner.first_spec_ptr == NIL {
      return Err(Error::validation("Спецификация пуста."));
    }

    let mut cur = owner.first_spec_ptr;
    while cur != NIL {
      let e = st.prs.read_at(cur)?;
      let comp = st.prd.read_at(e.component_ptr)?;

      if !e.deleted && comp.name == part_name {
        st.prs.mark_deleted(e.offset, true)?;
        let new_first = st.prs.rebuild_chain(owner.first_spec_ptr)?;
        return st.prd.update_ptrs(owner.offset, new_first, owner.next_ptr);
      }
      cur = e.next_ptr;
    }

    Err(Error::validation("Комплектующее в спецификации не найдено."))
  }

  /// The owner's live BOM lines in chain order
  /// 按链序返回所有者的存活 BOM 行
  pub fn list_spec_items(&mut self, owner_name: &str) -> Result<Vec<SpecItemView>> {
    let st = self.store_mut()?;

    let owner = st
      .prd
      .find_active(owner_name)?
      .ok_or_else(|| Error::validation("Компонент-родитель не найден."))?;

    if owner.kind == Kind::Detail {
      return Err(Error::validation("У детали нет спецификации."));
    }

    let chain = st.read_chain(owner.first_spec_ptr)?;
    let mut out = Vec::with_capacity(chain.len());
    for e in chain {
      let c = st.prd.read_at(e.component_ptr)?;
      out.push(SpecItemView {
        name: c.name,
        kind: c.kind,
        qty: e.qty,
      });
    }
    Ok(out)
  }
}
