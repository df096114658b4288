//! Marker cleanup for bookmarks created from marked tabs.
//!
//! A bookmark taken from a numbered tab would otherwise keep the invisible
//! prefix in its saved title forever. Reuses the marker predicates directly.

use crate::marker;

/// The bookmark title to write back, when the proposed one carries a marker.
///
/// `None` when the title is already clean, so callers can skip the rewrite
/// entirely in the common case.
pub fn cleaned_title(title: &str) -> Option<String> {
    marker::has_marker(title).then(|| marker::strip(title).to_string())
}
