//! Position resolver: which marker a tab at a given index should carry.

/// Number of positions reachable by distinct direct shortcuts.
pub const MAX_DIRECT: usize = 8;

/// Ordinal of the ninth glyph, reserved for whichever tab is currently last.
pub const OVERFLOW: usize = MAX_DIRECT;

/// The marker a tab should carry, decided by position alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredMarker {
    /// No marker: the tab sits between the direct range and the last slot.
    None,
    /// The glyph for this 0-based ordinal ([`OVERFLOW`] is the last-tab glyph).
    Direct(usize),
}

/// Desired marker for the tab at `index` in a window of `total` visible tabs.
///
/// The first eight indices each map to their own glyph. Past that, only the
/// last visible tab stays one keystroke away, so it always carries the
/// overflow glyph no matter how many tabs are open; tabs strictly between
/// index 8 and the end carry nothing.
pub fn desired(index: usize, total: usize) -> DesiredMarker {
    if index < MAX_DIRECT {
        DesiredMarker::Direct(index)
    } else if index + 1 == total {
        DesiredMarker::Direct(OVERFLOW)
    } else {
        DesiredMarker::None
    }
}
