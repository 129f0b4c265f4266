//! Tokenizer for completed input lines.
//!
//! Splits a raw line into a command name candidate and positional argument
//! tokens, honoring double-quoted substrings. Greedy and non-failing: an
//! unterminated quote takes the rest of the line as the final token.

/// Tokenizes a completed input line.
///
/// Rules:
/// - A maximal run of non-space characters is one token.
/// - A double-quoted span `"..."` (including embedded spaces) is one token
///   with the surrounding quotes stripped.
/// - An unterminated quote is tolerated; the rest of the line becomes the
///   final token's content.
/// - All-whitespace input yields zero tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        // Skip whitespace between tokens
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            if c == '"' {
                chars.next();
                token.push_str(&collect_quoted(&mut chars));
                continue;
            }
            chars.next();
            token.push(c);
        }
        tokens.push(token);
    }

    tokens
}

/// Collects characters until the closing quote or end of input.
fn collect_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut content = String::new();
    for c in chars.by_ref() {
        if c == '"' {
            break;
        }
        content.push(c);
    }
    content
}

/// Splits a line into a lower-cased command name and its arguments.
///
/// When `prefix` is configured and the first token starts with it, the
/// prefix character is stripped before the name is returned. Returns `None`
/// for lines that tokenize to nothing.
pub fn split_command(line: &str, prefix: Option<char>) -> Option<(String, Vec<String>)> {
    let mut tokens = tokenize(line);
    if tokens.is_empty() {
        return None;
    }

    let mut name = tokens.remove(0).to_lowercase();
    if let Some(p) = prefix {
        if let Some(stripped) = name.strip_prefix(p) {
            name = stripped.to_string();
        }
    }

    Some((name, tokens))
}
