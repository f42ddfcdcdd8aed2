//! Specification tree rendering
//! 规格树渲染

use bom_base::{Error, Kind, Result};
use bom_prd::ComponentRec;

use crate::catalog::{Catalog, Store};

/// Recursion bound; cyclic BOMs are cut here, not prevented
/// 递归上限；环状 BOM 在此截断，而非禁止
const DEPTH_MAX: u32 = 50;

impl Catalog {
  /// Render the pre-order BOM tree of a non-detail component.
  /// Children appear in chain order, not alphabetical.
  /// 渲染非零件组件的先序 BOM 树。子项按链序而非字母序。
  pub fn print_spec_tree(&mut self, name: &str) -> Result<String> {
    let st = self.store_mut()?;

    let comp = st
      .prd
      .find_active(name)?
      .ok_or_else(|| Error::validation("Компонент не найден."))?;

    if comp.kind == Kind::Detail {
      return Err(Error::validation("Для детали Print(имя) недопустима."));
    }

    let mut out = format!("{} ({})\n", comp.name, comp.kind);
    let children = st.read_chain(comp.first_spec_ptr)?;
    for (i, edge) in children.iter().enumerate() {
      let child = st.prd.read_at(edge.component_ptr)?;
      st.render(&mut out, &child, "", i + 1 == children.len(), 0)?;
    }
    Ok(out)
  }
}

impl Store {
  fn render(
    &mut self,
    out: &mut String,
    node: &ComponentRec,
    prefix: &str,
    is_last: bool,
    depth: u32,
  ) -> Result<()> {
    let branch = if is_last { "└── " } else { "├── " };

    if depth > DEPTH_MAX {
      out.push_str(prefix);
      out.push_str(branch);
      out.push_str("[...] (слишком глубокая спецификация)\n");
      return Ok(());
    }

    out.push_str(prefix);
    out.push_str(branch);
    out.push_str(&node.name);
    out.push_str(" (");
    out.push_str(node.kind.name());
    out.push_str(")\n");

    if node.kind == Kind::Detail {
      return Ok(());
    }

    let children = self.read_chain(node.first_spec_ptr)?;
    let next_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
    for (i, edge) in children.iter().enumerate() {
      let child = self.prd.read_at(edge.component_ptr)?;
      self.render(out, &child, &next_prefix, i + 1 == children.len(), depth + 1)?;
    }
    Ok(())
  }
}
