//! Command dispatch: name -> handler function
//! 命令分发：名称 -> 处理函数
//!
//! Handlers never panic the REPL: service errors land in
//! [`CmdOut::error`] and are rendered by the caller.
//! 处理函数不会让 REPL 崩溃：服务错误写入 [`CmdOut::error`]，
//! 由调用方渲染。

use std::fs;

use bom_catalog::{Catalog, Kind, Result};

use crate::parse::{Cmd, split_csv, strip_parens};

/// Outcome of one command / 一条命令的结果
#[derive(Debug, Default)]
pub struct CmdOut {
  pub output: String,
  pub error: String,
  pub exit: bool,
}

impl CmdOut {
  fn out(output: impl Into<String>) -> Self {
    Self {
      output: output.into(),
      ..Default::default()
    }
  }

  fn err(error: impl Into<String>) -> Self {
    Self {
      error: error.into(),
      ..Default::default()
    }
  }
}

/// `OK` on success, rendered error otherwise
/// 成功输出 `OK`，否则渲染错误
fn done(res: Result<()>) -> CmdOut {
  match res {
    Ok(()) => CmdOut::out("OK\n"),
    Err(e) => CmdOut::err(e.to_string()),
  }
}

pub type Handler = fn(&Cmd, &mut Catalog) -> CmdOut;

/// Resolve a command name, case-sensitive
/// 解析命令名，区分大小写
pub fn find(name: &str) -> Option<Handler> {
  Some(match name {
    "Create" => create,
    "Open" => open,
    "Input" => input,
    "Delete" => delete,
    "Restore" => restore,
    "Truncate" => truncate,
    "Print" => print,
    "Help" => help,
    "Exit" => exit,
    _ => return None,
  })
}

fn create(cmd: &Cmd, svc: &mut Catalog) -> CmdOut {
  if cmd.args.is_empty() {
    return CmdOut::err("Create: ожидается имяФайла(максДлина[,prs]) или имяФайла максДлина [prs].");
  }

  let first = &cmd.args[0];

  // Glued form: the whole call sits in one whitespace-delimited token
  // 粘连形式：整个调用位于一个空白分隔的词元内
  if let Some(pos) = first.find('(') {
    let base = &first[..pos];
    let inner = split_csv(strip_parens(&first[pos..]));
    if inner.is_empty() {
      return CmdOut::err("Create: не указан максДлина.");
    }
    let Ok(max_len) = inner[0].parse::<u16>() else {
      return CmdOut::err("Create: максДлина должна быть числом.");
    };
    let prs = inner.get(1).map(String::as_str);
    return done(svc.create(base, max_len, prs));
  }

  if cmd.args.len() < 2 {
    return CmdOut::err("Create: не указан максДлина.");
  }
  let Ok(max_len) = cmd.args[1].parse::<u16>() else {
    return CmdOut::err("Create: максДлина должна быть числом.");
  };
  let prs = cmd.args.get(2).map(String::as_str);
  done(svc.create(first, max_len, prs))
}

fn open(cmd: &Cmd, svc: &mut Catalog) -> CmdOut {
  if cmd.args.is_empty() {
    return CmdOut::err("Open: ожидается имя файла.");
  }
  done(svc.open(&cmd.args[0]))
}

fn input(cmd: &Cmd, svc: &mut Catalog) -> CmdOut {
  if cmd.args.is_empty() {
    return CmdOut::err("Input: ожидаются аргументы.");
  }

  // Component form: Input(name, kind)
  // 组件形式：Input(name, kind)
  if cmd.args.len() == 2 && !cmd.args[0].contains('/') {
    let Some(kind) = Kind::parse(&cmd.args[1]) else {
      return CmdOut::err("Input: тип должен быть Изделие/Узел/Деталь.");
    };
    return done(svc.input_component(&cmd.args[0], kind));
  }

  // BOM edge form: Input(owner/part[, qty])
  // BOM 边形式：Input(owner/part[, qty])
  let s = &cmd.args[0];
  let Some(slash) = s.find('/') else {
    return CmdOut::err("Input: формат владелец/комплектующее.");
  };

  let qty = if cmd.args.len() >= 2 {
    match cmd.args[1].parse::<u16>() {
      Ok(q) => q,
      Err(_) => return CmdOut::err("Input: количество должно быть числом."),
    }
  } else {
    1
  };

  done(svc.input_spec_item(&s[..slash], &s[slash + 1..], qty))
}

fn delete(cmd: &Cmd, svc: &mut Catalog) -> CmdOut {
  if cmd.args.is_empty() {
    return CmdOut::err("Delete: ожидается аргумент.");
  }

  let s = &cmd.args[0];
  match s.find('/') {
    None => done(svc.delete_component(s)),
    Some(slash) => done(svc.delete_spec_item(&s[..slash], &s[slash + 1..])),
  }
}

fn restore(cmd: &Cmd, svc: &mut Catalog) -> CmdOut {
  if cmd.args.is_empty() {
    return CmdOut::err("Restore: ожидается имя компонента или *.");
  }
  if cmd.args[0] == "*" {
    done(svc.restore_all())
  } else {
    done(svc.restore_component(&cmd.args[0]))
  }
}

fn truncate(_cmd: &Cmd, svc: &mut Catalog) -> CmdOut {
  done(svc.truncate())
}

fn print(cmd: &Cmd, svc: &mut Catalog) -> CmdOut {
  if cmd.args.is_empty() {
    return CmdOut::err("Print: ожидается имя компонента или *.");
  }

  if cmd.args[0] == "*" {
    return match svc.list_components() {
      Ok(list) => {
        let mut out = String::from("Наименование\tТип\n");
        for c in &list {
          out.push_str(&c.name);
          out.push('\t');
          out.push_str(c.kind.name());
          out.push('\n');
        }
        CmdOut::out(out)
      }
      Err(e) => CmdOut::err(e.to_string()),
    };
  }

  match svc.print_spec_tree(&cmd.args[0]) {
    Ok(tree) => CmdOut::out(tree),
    Err(e) => CmdOut::err(e.to_string()),
  }
}

fn help(cmd: &Cmd, svc: &mut Catalog) -> CmdOut {
  let text = svc.help_text();
  if cmd.args.is_empty() {
    return CmdOut::out(text);
  }
  match fs::write(&cmd.args[0], text) {
    Ok(()) => CmdOut::out("OK\n"),
    Err(e) => CmdOut::err(e.to_string()),
  }
}

fn exit(_cmd: &Cmd, svc: &mut Catalog) -> CmdOut {
  svc.close();
  CmdOut {
    exit: true,
    ..Default::default()
  }
}
