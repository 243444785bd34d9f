/// A run of display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSpan<'a> {
    Plain(&'a str),
    /// Text that was wrapped in underscores, e.g. a scientific name.
    Italic(&'a str),
}

/// Splits `text` into plain and italic runs. `_Quercus ilex_` becomes an italic `Quercus ilex`.
///
/// An underscore without a closing partner, or a pair with nothing between, stays literal.
pub fn emphasis_spans(text: &str) -> Vec<TextSpan<'_>> {
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('_') {
        let open = cursor + offset;
        let Some(length) = text[open + 1..].find('_') else {
            break;
        };
        let close = open + 1 + length;

        if length == 0 {
            cursor = close;
            continue;
        }

        if plain_start < open {
            spans.push(TextSpan::Plain(&text[plain_start..open]));
        }
        spans.push(TextSpan::Italic(&text[open + 1..close]));
        plain_start = close + 1;
        cursor = close + 1;
    }

    if plain_start < text.len() {
        spans.push(TextSpan::Plain(&text[plain_start..]));
    }

    spans
}
