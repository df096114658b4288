//! Marker codec: the two-unit ordinal prefix embedded in tab titles.
//!
//! A marked title starts with an invisible separator (U+2063) followed by one
//! superscript digit glyph. The separator never occurs in natural titles, so
//! the prefix can be detected and stripped without disturbing user text. A
//! title either has no marker or its first two units exactly match this
//! pattern; no other prefix form is valid.

/// Invisible Separator, the sentinel unit that opens every marker.
pub const SEPARATOR: char = '\u{2063}';

/// Ordinal glyphs for positions 1..=9, indexed by 0-based ordinal.
pub const GLYPHS: [char; 9] = ['¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// True when `title` is long enough to hold sentinel + glyph and its first
/// unit is the sentinel.
pub fn has_marker(title: &str) -> bool {
    let mut chars = title.chars();
    chars.next() == Some(SEPARATOR) && chars.next().is_some()
}

/// The 0-based ordinal encoded in `title`'s marker glyph.
///
/// `None` when the title carries no marker, or when the unit after the
/// sentinel is not one of the nine known glyphs.
pub fn marked_ordinal(title: &str) -> Option<usize> {
    if !has_marker(title) {
        return None;
    }
    let glyph = title.chars().nth(1)?;
    GLYPHS.iter().position(|&g| g == glyph)
}

/// Remove exactly the two marker units; no-op when `title` is unmarked.
pub fn strip(title: &str) -> &str {
    if !has_marker(title) {
        return title;
    }
    let tail = title
        .char_indices()
        .nth(2)
        .map(|(i, _)| i)
        .unwrap_or(title.len());
    &title[tail..]
}

/// Strip any existing marker, then prepend the marker for `ordinal`.
///
/// `ordinal` must be within `GLYPHS`; anything else is a caller bug.
pub fn with_marker(title: &str, ordinal: usize) -> String {
    let base = strip(title);
    let mut out = String::with_capacity(base.len() + SEPARATOR.len_utf8() + 2);
    out.push(SEPARATOR);
    out.push(GLYPHS[ordinal]);
    out.push_str(base);
    out
}
