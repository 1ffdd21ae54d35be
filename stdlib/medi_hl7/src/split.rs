//! Escape-aware single-character tokenizer used at every level of the message tree.

/// Split `source` on `delimiter`, leaving delimiters preceded by `escape` in place.
///
/// Behaviour worth knowing about:
/// - an empty source yields one empty token, not zero tokens;
/// - the escape marker is never decoded, it stays in the token together with
///   the delimiter it protects;
/// - only the single preceding character is inspected, so `\\|` still counts as
///   an escaped delimiter;
/// - a pending empty token at the end of the scan is dropped, so `"A|"` yields
///   `["A"]` and does not render back to its source.
pub fn split_escaped(source: &str, delimiter: char, escape: char) -> Vec<String> {
    if source.is_empty() {
        return vec![String::new()];
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;

    for ch in source.chars() {
        if ch == delimiter && previous != Some(escape) {
            tokens.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
        previous = Some(ch);
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
