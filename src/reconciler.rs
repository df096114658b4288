//! Per-tab title reconciliation and self-echo suppression.
//!
//! [`decide`] is the pure half: current title in, [`TitleDecision`] out.
//! [`Reconciler`] wraps it with the side effects: the title write against the
//! host, and the suppression set that keeps the system's own rewrites from
//! being reprocessed as user-driven title changes.

use crate::host::{TabHost, TabId, TabInfo};
use crate::marker;
use crate::position::{self, DesiredMarker};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of comparing a tab's current title against its desired marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleDecision {
    /// Title is absent or already correct; nothing to write.
    Noop,
    /// Title must be replaced with this value.
    Rewrite(String),
}

/// What, if anything, the title of the tab at `index` should become.
///
/// A missing title is skipped outright (it may not have loaded yet; a later
/// title-change notification will bring the tab back). A title whose marker
/// already matches the desired state is never touched, which both keeps
/// updates idempotent and avoids needless notification storms.
pub fn decide(title: Option<&str>, index: usize, total: usize) -> TitleDecision {
    let Some(title) = title else {
        return TitleDecision::Noop;
    };
    match position::desired(index, total) {
        DesiredMarker::None => {
            if marker::has_marker(title) {
                TitleDecision::Rewrite(marker::strip(title).to_string())
            } else {
                TitleDecision::Noop
            }
        }
        DesiredMarker::Direct(ordinal) => {
            if marker::marked_ordinal(title) == Some(ordinal) {
                TitleDecision::Noop
            } else {
                TitleDecision::Rewrite(marker::with_marker(title, ordinal))
            }
        }
    }
}

/// Issues title rewrites and tracks which tabs' next title-change
/// notification is a self-inflicted echo to ignore.
///
/// Cheap to clone; clones share the suppression set.
#[derive(Clone)]
pub struct Reconciler {
    host: Arc<dyn TabHost>,
    suppressed: Arc<Mutex<HashSet<TabId>>>,
    suppression_timeout: Duration,
}

impl Reconciler {
    pub fn new(host: Arc<dyn TabHost>, suppression_timeout: Duration) -> Self {
        Self {
            host,
            suppressed: Arc::new(Mutex::new(HashSet::new())),
            suppression_timeout,
        }
    }

    pub(crate) fn host(&self) -> &Arc<dyn TabHost> {
        &self.host
    }

    /// Consume one suppression entry for `tab`, returning true when the
    /// incoming title-change notification is an echo of our own write and
    /// should be ignored.
    pub fn consume_suppression(&self, tab: TabId) -> bool {
        self.suppressed.lock().remove(&tab)
    }

    /// Bring one tab's title in line with its position.
    ///
    /// The tab id goes into the suppression set before the write is issued.
    /// On write failure the entry is released immediately and the error is
    /// logged and swallowed; a rejected rewrite (privileged tabs, typically)
    /// must not stop the rest of the batch, and must not leave an entry
    /// behind that would swallow a later legitimate title change. On success
    /// the entry stays armed until the echoed title-change notification
    /// consumes it, with a timed release as the safety net for tabs that
    /// accept the write but never echo.
    pub async fn reconcile(&self, tab: &TabInfo, index: usize, total: usize) {
        let new_title = match decide(tab.title.as_deref(), index, total) {
            TitleDecision::Noop => return,
            TitleDecision::Rewrite(title) => title,
        };
        log::debug!(
            "tab {}: rewriting title for index {index} of {total}",
            tab.id
        );

        self.suppressed.lock().insert(tab.id);
        self.spawn_suppression_timeout(tab.id);

        if let Err(err) = self.host.set_title(tab.id, &new_title).await {
            log::warn!("tab {}: title rewrite failed: {err}", tab.id);
            self.suppressed.lock().remove(&tab.id);
        }
    }

    fn spawn_suppression_timeout(&self, tab: TabId) {
        let suppressed = Arc::clone(&self.suppressed);
        let timeout = self.suppression_timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if suppressed.lock().remove(&tab) {
                log::debug!("tab {tab}: suppression entry expired unconsumed");
            }
        });
    }
}
