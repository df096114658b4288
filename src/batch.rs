//! Batch updates over a window's visible-tab list.
//!
//! The range-walk entry points the event coordinator drives. Per-tab
//! failures are logged inside `reconcile` and never abort the walk.

use crate::host::{TabInfo, WindowId};
use crate::reconciler::Reconciler;

impl Reconciler {
    /// Reconcile every tab from `start_index` to the end of the list, each
    /// against its index and the full visible count.
    ///
    /// Structural changes can only affect the desired marker of tabs at or
    /// after the change point, so callers pass the smallest index that might
    /// be stale. Starting from 0 is always correct too, just more work.
    pub async fn update_from(&self, tabs: &[TabInfo], start_index: usize) {
        let total = tabs.len();
        for (index, tab) in tabs.iter().enumerate().skip(start_index) {
            self.reconcile(tab, index, total).await;
        }
    }

    /// Query `window`'s visible tabs and reconcile the whole list.
    ///
    /// A failed query abandons this pass; the next notification for the
    /// window retries implicitly.
    pub async fn update_all(&self, window: WindowId) {
        match self.host().visible_tabs(window).await {
            Ok(tabs) => self.update_from(&tabs, 0).await,
            Err(err) => log::warn!("window {window}: visible-tab query failed: {err}"),
        }
    }
}
