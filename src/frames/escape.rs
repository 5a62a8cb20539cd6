use std::borrow::Cow;

// Header text escaping. Only header keys and values go through here, never
// the command or the body.
//
//   \   <-> \\
//   CR  <-> \r
//   LF  <-> \n
//   :   <-> \c

fn needs_escape(c: char) -> bool { matches!(c, '\\' | '\r' | '\n' | ':') }

/// Escapes `text` for use as a header key or value.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            ':' => out.push_str("\\c"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverses [`escape`].
///
/// Each backslash consumes exactly the character after it, so an escaped
/// backslash followed by `r`, `n` or `c` stays a backslash and a letter.
/// Unknown sequences and a trailing backslash are kept as they are.
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('\\') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('c') => out.push(':'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}
