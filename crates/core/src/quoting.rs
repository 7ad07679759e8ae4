//! Path quoting for command lines.
//!
//! Command lines handed to external tools are whitespace-delimited, so any
//! path that may contain spaces is wrapped in double quotes before it is
//! embedded. Filesystem checks must see the bare path, so `dequote` is
//! applied before any existence test.

/// Delimiter used to wrap paths.
pub const QUOTE: char = '"';

fn is_wrapped(value: &str) -> bool {
    value.len() >= 2 && value.starts_with(QUOTE) && value.ends_with(QUOTE)
}

/// Wraps `value` in double quotes unless it is already wrapped.
///
/// Only the first and last characters are inspected, so `quote(quote(s))`
/// always equals `quote(s)`.
pub fn quote(value: &str) -> String {
    if is_wrapped(value) {
        value.to_string()
    } else {
        format!("{QUOTE}{value}{QUOTE}")
    }
}

/// Removes wrapping double quotes from `value`.
///
/// Stripping repeats while the value is still wrapped, so the result never
/// starts and ends with a quote and `dequote(dequote(s)) == dequote(s)`.
/// Values without wrapping are returned unchanged.
pub fn dequote(value: &str) -> String {
    let mut inner = value;
    while is_wrapped(inner) {
        inner = &inner[1..inner.len() - 1];
    }
    inner.to_string()
}

/// Splits a command line into program arguments.
///
/// Tokens are separated by ASCII whitespace. A double-quoted run keeps its
/// whitespace and loses the quotes, so `"C:\Program Files\x.exe" -p` yields
/// two tokens. An unterminated quote extends to the end of the line.
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in line.chars() {
        match ch {
            QUOTE => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_ascii_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if has_token {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_wraps_bare_path() {
        assert_eq!(quote("/srv/print jobs/a.pdf"), "\"/srv/print jobs/a.pdf\"");
    }

    #[test]
    fn test_quote_is_idempotent() {
        for s in ["", "a", "\"", "a b", "\"a b\"", "\"half", "half\""] {
            assert_eq!(quote(&quote(s)), quote(s), "input {s:?}");
        }
    }

    #[test]
    fn test_quote_never_doubles() {
        assert_eq!(quote("\"x\""), "\"x\"");
    }

    #[test]
    fn test_dequote_strips_wrapping() {
        assert_eq!(dequote("\"/tmp/a b\""), "/tmp/a b");
        assert_eq!(dequote("/tmp/plain"), "/tmp/plain");
        assert_eq!(dequote("\"\""), "");
    }

    #[test]
    fn test_dequote_is_idempotent() {
        for s in ["", "\"", "\"\"", "\"a\"", "\"\"a\"\"", "a\"", "\"a"] {
            assert_eq!(dequote(&dequote(s)), dequote(s), "input {s:?}");
        }
    }

    #[test]
    fn test_dequote_ignores_internal_quotes() {
        assert_eq!(dequote("say \"hi\" now"), "say \"hi\" now");
    }

    #[test]
    fn test_split_command_line() {
        let tokens = split_command_line("\"/opt/pdf print/pp\"  -silent -printer \"Lab 2\" \"/a b/c.pdf\"");
        assert_eq!(
            tokens,
            vec!["/opt/pdf print/pp", "-silent", "-printer", "Lab 2", "/a b/c.pdf"]
        );
    }

    #[test]
    fn test_split_command_line_keeps_empty_quoted_token() {
        assert_eq!(split_command_line("tool \"\" x"), vec!["tool", "", "x"]);
    }

    #[test]
    fn test_split_command_line_empty() {
        assert!(split_command_line("   ").is_empty());
    }
}
