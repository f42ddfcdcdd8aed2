//! Universal invariants over generated operation sequences
//! 针对生成操作序列的通用不变量

use bom_catalog::{Catalog, Kind};
use proptest::prelude::*;
use tempfile::TempDir;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

fn new_cat(dir: &TempDir) -> Catalog {
  let mut c = Catalog::new();
  let base = dir.path().join("p");
  c.create(base.to_str().unwrap(), 16, None).unwrap();
  c
}

fn names(c: &mut Catalog) -> Vec<String> {
  c.list_components()
    .unwrap()
    .into_iter()
    .map(|r| r.name)
    .collect()
}

/// Distinct short names in arbitrary insertion order
/// 任意插入顺序的互异短名称
fn name_set() -> impl Strategy<Value = Vec<String>> {
  prop::collection::btree_set("[a-z]{1,8}", 1..10)
    .prop_map(|s| s.into_iter().collect::<Vec<_>>())
    .prop_shuffle()
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(24))]

  /// Listing is byte-wise ascending for any insertion order
  /// 任意插入顺序下列表均按字节序升序
  #[test]
  fn prop_listing_sorted(input in name_set()) {
    let dir = tempfile::tempdir().unwrap();
    let mut c = new_cat(&dir);
    for n in &input {
      c.input_component(n, Kind::Detail).unwrap();
    }

    let mut expect = input.clone();
    expect.sort();
    prop_assert_eq!(names(&mut c), expect);
  }

  /// Every inserted component is immediately observable with its kind
  /// 每个插入的组件都能立即观察到且类型正确
  #[test]
  fn prop_insert_observable(input in name_set()) {
    let dir = tempfile::tempdir().unwrap();
    let mut c = new_cat(&dir);

    for (i, n) in input.iter().enumerate() {
      let kind = if i % 2 == 0 { Kind::Detail } else { Kind::Node };
      c.input_component(n, kind).unwrap();
      let rec = c
        .list_components()
        .unwrap()
        .into_iter()
        .find(|r| &r.name == n);
      let rec = rec.unwrap();
      prop_assert_eq!(rec.kind, kind);
    }
  }

  /// Delete then restore is observationally a no-op
  /// 删除后恢复在可观察层面等价于不操作
  #[test]
  fn prop_delete_restore_roundtrip(input in name_set()) {
    let dir = tempfile::tempdir().unwrap();
    let mut c = new_cat(&dir);
    for n in &input {
      c.input_component(n, Kind::Detail).unwrap();
    }
    let before = names(&mut c);

    let victim = &input[0];
    c.delete_component(victim).unwrap();
    prop_assert!(!names(&mut c).contains(victim));

    c.restore_component(victim).unwrap();
    prop_assert_eq!(names(&mut c), before);
  }

  /// Truncation preserves every live view and minimizes both files
  /// 压缩保持所有存活视图并使两个文件最小化
  #[test]
  fn prop_truncate_preserves_views(input in name_set()) {
    let dir = tempfile::tempdir().unwrap();
    let mut c = new_cat(&dir);
    for n in &input {
      c.input_component(n, Kind::Node).unwrap();
    }

    let owner = &input[0];
    for (i, part) in input.iter().enumerate().skip(1) {
      c.input_spec_item(owner, part, i as u16).unwrap();
    }
    // Tombstone every second edge
    // 每隔一条边打墓碑
    for part in input.iter().skip(1).step_by(2) {
      c.delete_spec_item(owner, part).unwrap();
    }

    let names_before = names(&mut c);
    let items_before = c.list_spec_items(owner).unwrap();

    c.truncate().unwrap();

    prop_assert_eq!(names(&mut c), names_before);
    let items_after = c.list_spec_items(owner).unwrap();
    prop_assert_eq!(&items_after, &items_before);

    let prd_len = std::fs::metadata(dir.path().join("p.prd")).unwrap().len();
    let prs_len = std::fs::metadata(dir.path().join("p.prs")).unwrap().len();
    prop_assert_eq!(prd_len, 28 + input.len() as u64 * 26);
    prop_assert_eq!(prs_len, 8 + items_after.len() as u64 * 11);
  }
}
