//! Parsing and dispatch tests
//! 解析与分发测试

use aok::{OK, Void};
use bom::{
  Catalog,
  cmd::{self, CmdOut},
  parse::{parse_line, split_csv, strip_parens},
};
use log::info;
use tempfile::TempDir;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

#[test]
fn test_parse_paren_form() -> Void {
  let c = parse_line("Input(Car/Wheel, 4)");
  assert_eq!(c.name, "Input");
  assert_eq!(c.args, ["Car/Wheel", "4"]);
  OK
}

#[test]
fn test_parse_paren_no_space() -> Void {
  // The name ends at `(`, a space before the list is optional
  // 命令名止于 `(`，列表前的空格可有可无
  let c = parse_line("Input(A,Деталь)");
  assert_eq!(c.name, "Input");
  assert_eq!(c.args, ["A", "Деталь"]);

  let c = parse_line("Input (A, Деталь)");
  assert_eq!(c.name, "Input");
  assert_eq!(c.args, ["A", "Деталь"]);
  OK
}

#[test]
fn test_parse_ws_form() -> Void {
  let c = parse_line("Create f 16 s");
  assert_eq!(c.name, "Create");
  assert_eq!(c.args, ["f", "16", "s"]);
  OK
}

#[test]
fn test_parse_glued_create() -> Void {
  // The whole call glued into one token reaches the handler verbatim
  // 整个调用粘成一个词元，原样交给处理函数
  let c = parse_line("Create f(16,s)");
  assert_eq!(c.name, "Create");
  assert_eq!(c.args, ["f(16,s)"]);
  OK
}

#[test]
fn test_parse_quotes() -> Void {
  let c = parse_line(r#"Input("a b", Деталь)"#);
  assert_eq!(c.name, "Input");
  assert_eq!(c.args, ["a b", "Деталь"]);
  OK
}

#[test]
fn test_parse_bare_and_empty() -> Void {
  let c = parse_line("Truncate");
  assert_eq!(c.name, "Truncate");
  assert!(c.args.is_empty());

  assert_eq!(parse_line("").name, "");
  assert_eq!(parse_line("   ").name, "");
  OK
}

#[test]
fn test_split_csv() -> Void {
  assert_eq!(split_csv("a, b ,c"), ["a", "b", "c"]);
  assert_eq!(split_csv("a,"), ["a", ""]);
  assert_eq!(split_csv(r#""a,b",c"#), ["a,b", "c"]);
  assert!(split_csv("").is_empty());
  OK
}

#[test]
fn test_strip_parens() -> Void {
  assert_eq!(strip_parens("( a, b )"), "a, b");
  assert_eq!(strip_parens("a, b"), "a, b");
  assert_eq!(strip_parens("()"), "");
  OK
}

#[test]
fn test_find_is_exact() -> Void {
  assert!(cmd::find("Create").is_some());
  assert!(cmd::find("Print").is_some());
  assert!(cmd::find("Exit").is_some());
  assert!(cmd::find("create").is_none());
  assert!(cmd::find("Drop").is_none());
  OK
}

fn run(line: &str, svc: &mut Catalog) -> CmdOut {
  let parsed = parse_line(line);
  let handler = cmd::find(&parsed.name).unwrap();
  handler(&parsed, svc)
}

fn ok(line: &str, svc: &mut Catalog) {
  let res = run(line, svc);
  assert_eq!(res.error, "", "{line}");
  assert_eq!(res.output, "OK\n", "{line}");
}

#[test]
fn test_console_session() -> Void {
  let dir = TempDir::new().unwrap();
  let base = dir.path().join("a");
  let base = base.to_str().unwrap();
  let mut svc = Catalog::new();

  ok(&format!("Create {base} 16"), &mut svc);
  ok("Input(Wheel, Деталь)", &mut svc);
  ok("Input(Bolt, Деталь)", &mut svc);
  ok("Input(Car, Изделие)", &mut svc);

  let res = run("Print(*)", &mut svc);
  assert_eq!(
    res.output,
    "Наименование\tТип\n\
     Bolt\tДеталь\n\
     Car\tИзделие\n\
     Wheel\tДеталь\n"
  );

  ok("Input(Car/Wheel, 4)", &mut svc);
  ok("Input(Car/Bolt, 20)", &mut svc);

  let res = run("Print(Car)", &mut svc);
  assert_eq!(
    res.output,
    "Car (Изделие)\n\
     ├── Wheel (Деталь)\n\
     └── Bolt (Деталь)\n"
  );

  // Referenced component refuses deletion, the edge goes first
  // 被引用组件拒绝删除，先删边
  let res = run("Delete(Wheel)", &mut svc);
  assert!(!res.error.is_empty());
  ok("Delete(Car/Wheel)", &mut svc);
  ok("Delete(Wheel)", &mut svc);

  ok("Restore(Wheel)", &mut svc);
  ok("Restore(*)", &mut svc);
  ok("Truncate", &mut svc);

  let res = run("Exit", &mut svc);
  assert!(res.exit);
  assert!(!svc.is_open());
  info!("session ok");
  OK
}

#[test]
fn test_console_glued_create() -> Void {
  let dir = TempDir::new().unwrap();
  let base = dir.path().join("g");
  let mut svc = Catalog::new();

  ok(&format!("Create {}(16)", base.to_str().unwrap()), &mut svc);
  assert!(dir.path().join("g.prd").exists());
  assert!(dir.path().join("g.prs").exists());
  OK
}

#[test]
fn test_console_bad_args() -> Void {
  let mut svc = Catalog::new();

  assert!(!run("Create", &mut svc).error.is_empty());
  assert!(!run("Create f", &mut svc).error.is_empty());
  assert!(!run("Create f x", &mut svc).error.is_empty());
  assert!(!run("Open", &mut svc).error.is_empty());
  assert!(!run("Input", &mut svc).error.is_empty());
  assert!(!run("Input(X, Болт)", &mut svc).error.is_empty());
  assert!(!run("Delete", &mut svc).error.is_empty());
  assert!(!run("Restore", &mut svc).error.is_empty());
  assert!(!run("Print", &mut svc).error.is_empty());
  OK
}

#[test]
fn test_console_service_error_rendered() -> Void {
  let dir = TempDir::new().unwrap();
  let base = dir.path().join("e");
  let mut svc = Catalog::new();

  ok(&format!("Create {} 16", base.to_str().unwrap()), &mut svc);
  let res = run("Delete(Ghost)", &mut svc);
  assert_eq!(res.error, "Компонент не найден.");
  assert_eq!(res.output, "");
  OK
}

#[test]
fn test_console_default_qty() -> Void {
  let dir = TempDir::new().unwrap();
  let base = dir.path().join("q");
  let mut svc = Catalog::new();

  ok(&format!("Create {} 16", base.to_str().unwrap()), &mut svc);
  ok("Input(Box, Узел)", &mut svc);
  ok("Input(Pin, Деталь)", &mut svc);
  ok("Input(Box/Pin)", &mut svc);

  let res = run("Print(Box)", &mut svc);
  assert_eq!(res.output, "Box (Узел)\n└── Pin (Деталь)\n");
  OK
}

#[test]
fn test_console_help() -> Void {
  let dir = TempDir::new().unwrap();
  let mut svc = Catalog::new();

  let res = run("Help", &mut svc);
  assert!(res.output.starts_with("Команды:"));
  assert!(res.output.contains("Truncate"));

  // Help with a file argument writes the text out
  // 带文件参数的 Help 将文本写入文件
  let path = dir.path().join("help.txt");
  let res = run(&format!("Help {}", path.to_str().unwrap()), &mut svc);
  assert_eq!(res.output, "OK\n");
  let text = std::fs::read_to_string(&path).unwrap();
  assert!(text.contains("Restore(*)"));
  OK
}
