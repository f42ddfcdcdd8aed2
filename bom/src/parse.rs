//! Console line parsing
//! 控制台命令行解析
//!
//! Two argument styles: `Name(a, b)` and `Name a b`. Double quotes
//! group an argument; the quote characters themselves are dropped.
//! 两种参数风格：`Name(a, b)` 与 `Name a b`。双引号把内容归为一个
//! 参数，引号本身被去掉。

/// One parsed console line / 一条解析后的控制台命令
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cmd {
  pub name: String,
  pub args: Vec<String>,
  pub raw: String,
}

fn trim_ws(s: &str) -> &str {
  s.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Strip one pair of outer parentheses / 去掉一层外括号
pub fn strip_parens(s: &str) -> &str {
  let t = trim_ws(s);
  if t.len() >= 2 && t.starts_with('(') && t.ends_with(')') {
    trim_ws(&t[1..t.len() - 1])
  } else {
    t
  }
}

/// Split comma-separated arguments outside double quotes
/// 在双引号之外按逗号切分参数
pub fn split_csv(s: &str) -> Vec<String> {
  let mut out = Vec::new();
  let mut cur = String::new();
  let mut in_quotes = false;

  for ch in s.chars() {
    if ch == '"' {
      in_quotes = !in_quotes;
      continue;
    }
    if !in_quotes && ch == ',' {
      out.push(trim_ws(&cur).to_owned());
      cur.clear();
      continue;
    }
    cur.push(ch);
  }
  if !cur.is_empty() || !out.is_empty() {
    out.push(trim_ws(&cur).to_owned());
  }
  out
}

/// Parse one line. The command name runs to the first whitespace or
/// `(`, so both `Input(a, b)` and `Input (a, b)` resolve to `Input`.
/// 解析一行。命令名止于首个空白或 `(`，
/// 因此 `Input(a, b)` 与 `Input (a, b)` 都解析出 `Input`。
pub fn parse_line(line: &str) -> Cmd {
  let mut cmd = Cmd {
    raw: line.to_owned(),
    ..Default::default()
  };

  let t = trim_ws(line);
  if t.is_empty() {
    return cmd;
  }

  let i = t
    .find(|c: char| c.is_ascii_whitespace() || c == '(')
    .unwrap_or(t.len());
  cmd.name = t[..i].to_owned();

  let rest = trim_ws(&t[i..]);
  if rest.is_empty() {
    return cmd;
  }

  if rest.starts_with('(') {
    cmd.args = split_csv(strip_parens(rest));
    return cmd;
  }

  cmd.args = rest
    .split(|c: char| c.is_ascii_whitespace())
    .filter(|a| !a.is_empty())
    .map(str::to_owned)
    .collect();
  cmd
}
