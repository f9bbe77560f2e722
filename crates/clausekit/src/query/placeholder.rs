//! `?` placeholder scanning.
//!
//! Scanning follows PostgreSQL's lexical rules. A `?` is not a placeholder
//! when it sits inside:
//!
//! - a `'...'` literal (`''` stays inside), or an `E'...'` literal where `\'` also does
//! - a `"..."` identifier
//! - a `-- ...` line comment or a `/* ... */` block comment
//! - a `$tag$ ... $tag$` dollar-quoted body (`$$ ... $$` included)

use std::borrow::Cow;

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| from + p)
}

/// Index just past the closing `quote`, starting inside the quoted text.
fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8, backslash_escapes: bool) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if backslash_escapes => i += 2,
            b if b == quote => {
                if bytes.get(i + 1) == Some(&quote) {
                    i += 2;
                } else {
                    return i + 1;
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Length of the `$tag$` opener at `i`, if there is one.
///
/// `$1` (a numbered parameter) and `a$b` (an identifier) are not openers.
fn dollar_tag_len(bytes: &[u8], i: usize) -> Option<usize> {
    if i > 0 && is_ident_byte(bytes[i - 1]) {
        return None;
    }
    let mut j = i + 1;
    if bytes
        .get(j)
        .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_')
    {
        while bytes
            .get(j)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            j += 1;
        }
    }
    (bytes.get(j) == Some(&b'$')).then_some(j - i + 1)
}

/// Walk `sql`, calling `on_marker` with the byte offset of every placeholder `?`.
///
/// All delimiters are ASCII, so byte offsets always land on char boundaries.
fn scan(sql: &str, mut on_marker: impl FnMut(usize)) {
    let bytes = sql.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => {
                let escapes = i > 0
                    && matches!(bytes[i - 1], b'E' | b'e')
                    && (i < 2 || !is_ident_byte(bytes[i - 2]));
                i = skip_quoted(bytes, i + 1, b'\'', escapes);
            }
            b'"' => i = skip_quoted(bytes, i + 1, b'"', false),
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                i = find(bytes, i + 2, b"\n").map_or(bytes.len(), |p| p + 1);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = find(bytes, i + 2, b"*/").map_or(bytes.len(), |p| p + 2);
            }
            b'$' => match dollar_tag_len(bytes, i) {
                Some(len) => {
                    let tag = &bytes[i..i + len];
                    i = find(bytes, i + len, tag).map_or(bytes.len(), |p| p + len);
                }
                None => i += 1,
            },
            b'?' => {
                on_marker(i);
                i += 1;
            }
            _ => i += 1,
        }
    }
}

/// Count `?` placeholders outside literals, comments and dollar quotes.
pub fn count(sql: &str) -> usize {
    let mut n = 0;
    scan(sql, |_| n += 1);
    n
}

/// Rewrite `?` placeholders to `$1, $2, ...`.
///
/// Returns the input unchanged (borrowed) when it has no placeholders.
pub fn number(sql: &str) -> Cow<'_, str> {
    let mut positions = Vec::new();
    scan(sql, |idx| positions.push(idx));
    if positions.is_empty() {
        return Cow::Borrowed(sql);
    }

    let mut out = String::with_capacity(sql.len() + positions.len() * 2);
    let mut last = 0;
    for (n, pos) in positions.into_iter().enumerate() {
        out.push_str(&sql[last..pos]);
        out.push('$');
        out.push_str(&(n + 1).to_string());
        last = pos + 1;
    }
    out.push_str(&sql[last..]);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_unquoted_markers() {
        assert_eq!(count("a = ? AND b = ?"), 2);
        assert_eq!(count("a = '?' AND b = ?"), 1);
        assert_eq!(count(r#"SELECT "why?" FROM t WHERE x = ?"#), 1);
        assert_eq!(count("note = 'it''s ?' OR n = ?"), 1);
        assert_eq!(count("SELECT 1"), 0);
    }

    #[test]
    fn numbers_markers_in_order() {
        assert_eq!(
            number("SELECT * FROM t WHERE a = ? AND b = ? "),
            "SELECT * FROM t WHERE a = $1 AND b = $2 "
        );
        assert_eq!(number("x = '?' AND y = ?"), "x = '?' AND y = $1");
    }

    #[test]
    fn escape_string_backslash_quote_stays_inside() {
        assert_eq!(
            number(r"note = E'it\'s ?' AND id = ?"),
            r"note = E'it\'s ?' AND id = $1"
        );
        assert_eq!(count(r"a = e'\\' AND b = ?"), 1);
        // Backslash is literal in a standard string.
        assert_eq!(count(r"a = 'C:\' AND b = ?"), 1);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            number("id = ? -- why?\n AND x = ?"),
            "id = $1 -- why?\n AND x = $2"
        );
        assert_eq!(count("id = ? -- trailing?"), 1);
        assert_eq!(number("/* any? */ id = ?"), "/* any? */ id = $1");
        assert_eq!(count("id = ? /* unterminated ?"), 1);
        // A single dash is just minus.
        assert_eq!(count("a - ? > 0"), 1);
    }

    #[test]
    fn dollar_quoted_bodies_are_skipped() {
        assert_eq!(
            number("body = $$ what? $$ AND id = ?"),
            "body = $$ what? $$ AND id = $1"
        );
        assert_eq!(
            number("body = $fn$ a ? $x$ b $fn$ AND id = ?"),
            "body = $fn$ a ? $x$ b $fn$ AND id = $1"
        );
        assert_eq!(count("body = $$ unterminated ?"), 0);
    }

    #[test]
    fn dollar_params_and_identifiers_are_not_tags() {
        assert_eq!(count("a = $1 AND b = ?"), 1);
        assert_eq!(count("price$usd = ? AND tax$ = ?"), 2);
    }

    #[test]
    fn no_markers_borrows() {
        assert!(matches!(number("SELECT 1"), Cow::Borrowed("SELECT 1")));
    }
}
