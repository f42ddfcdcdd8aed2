//! `PS>` console loop
//! `PS>` 控制台循环

use std::io::{self, BufRead, Write};

use bom::{Catalog, cmd, parse};

fn prompt() -> io::Result<()> {
  let mut out = io::stdout();
  out.write_all(b"PS> ")?;
  out.flush()
}

fn main() -> io::Result<()> {
  log_init::init();

  let mut svc = Catalog::new();
  prompt()?;

  for line in io::stdin().lock().lines() {
    let parsed = parse::parse_line(&line?);

    if parsed.name.is_empty() {
      prompt()?;
      continue;
    }

    let Some(handler) = cmd::find(&parsed.name) else {
      log::debug!("unknown command: {}", parsed.name);
      println!("Неизвестная команда. Введите Help.");
      prompt()?;
      continue;
    };

    let res = handler(&parsed, &mut svc);
    if !res.error.is_empty() {
      println!("Ошибка: {}", res.error);
    }
    if !res.output.is_empty() {
      print!("{}", res.output);
    }
    if res.exit {
      break;
    }
    prompt()?;
  }
  Ok(())
}
