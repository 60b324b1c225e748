//! Markup stripping for plain-text bodies.

/// Remove every `<...>` run from `html`.
///
/// No entity decoding is done. An unterminated `<` is kept along with the
/// rest of the input.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}
