//! Event coordinator: turns host lifecycle notifications into batch updates.
//!
//! One notification in, one batch-updater invocation out: the coordinator
//! picks the window and the smallest start index the event class allows,
//! debounces the noisy hidden-state class, and polls for removals that the
//! host reports before they are visible in queries.

use crate::host::{TabEvent, TabHost, TabId, TabInfo, WindowId};
use crate::marker;
use crate::reconciler::Reconciler;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Delays governing the coordinator's timers. No external override surface;
/// tests shrink these to keep runs fast.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    /// How long a burst of hidden-state changes may keep arriving before the
    /// single full recompute fires.
    pub debounce_delay: Duration,
    /// Interval between visible-tab queries while waiting for a removed tab
    /// to actually disappear from results.
    pub removal_poll_interval: Duration,
    /// Safety-net release for suppression entries whose echo never arrives.
    pub suppression_timeout: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(150),
            removal_poll_interval: Duration::from_millis(100),
            suppression_timeout: Duration::from_secs(1),
        }
    }
}

/// Subscribes to tab lifecycle notifications and drives the reconciler.
///
/// Cheap to clone; clones share the suppression set and the per-window
/// debounce state. Runs for the lifetime of the host process and re-arms
/// after every notification; there is no terminal state.
#[derive(Clone)]
pub struct Coordinator {
    host: Arc<dyn TabHost>,
    reconciler: Reconciler,
    /// Windows with a pending debounced full recompute.
    debounce_pending: Arc<Mutex<HashSet<WindowId>>>,
    timings: Timings,
}

impl Coordinator {
    pub fn new(host: Arc<dyn TabHost>, timings: Timings) -> Self {
        let reconciler = Reconciler::new(Arc::clone(&host), timings.suppression_timeout);
        Self {
            host,
            reconciler,
            debounce_pending: Arc::new(Mutex::new(HashSet::new())),
            timings,
        }
    }

    /// The reconciler this coordinator drives.
    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Startup pass: number every open window's visible tabs from scratch.
    pub async fn resync_all(&self) {
        match self.host.windows().await {
            Ok(windows) => {
                log::info!("initial numbering pass over {} window(s)", windows.len());
                for window in windows {
                    self.reconciler.update_all(window).await;
                }
            }
            Err(err) => log::warn!("window enumeration failed: {err}"),
        }
    }

    /// Drain host notifications until the sender side closes.
    ///
    /// Each event is handled on its own task so the long-running handlers
    /// (removal polling, hidden-change debounce) never block later events;
    /// by the time a handler's query returns the list may already be stale,
    /// and the event that made it stale re-triggers reconciliation.
    pub async fn run(self, mut events: UnboundedReceiver<TabEvent>) {
        while let Some(event) = events.recv().await {
            let coordinator = self.clone();
            tokio::spawn(async move { coordinator.handle(event).await });
        }
    }

    /// Apply one lifecycle notification.
    pub async fn handle(&self, event: TabEvent) {
        log::debug!("handling {event:?}");
        match event {
            TabEvent::Created(tab) => self.on_inserted(tab.id, tab.window_id).await,
            TabEvent::Attached {
                tab_id,
                new_window_id,
            } => self.on_inserted(tab_id, new_window_id).await,
            TabEvent::Detached {
                tab_id,
                old_window_id,
            } => self.on_detached(tab_id, old_window_id).await,
            // The moved tab's prior index cannot be reliably known relative
            // to hidden tabs, so rescan the whole visible list.
            TabEvent::Moved { window_id, .. } => self.reconciler.update_all(window_id).await,
            TabEvent::Removed { tab_id, window_id } => self.on_removed(tab_id, window_id).await,
            TabEvent::TitleChanged { tab_id, window_id } => {
                self.on_title_changed(tab_id, window_id).await;
            }
            TabEvent::HiddenChanged { window_id } => self.on_hidden_changed(window_id).await,
        }
    }

    /// A tab landed at some position in `window`, by creation or attachment.
    /// Tabs before that position keep their indices; when it landed last,
    /// step back one so the previous holder of the overflow marker gets
    /// re-evaluated and stripped if it is no longer last.
    async fn on_inserted(&self, tab_id: TabId, window: WindowId) {
        let tabs = match self.host.visible_tabs(window).await {
            Ok(tabs) => tabs,
            Err(err) => {
                log::warn!("window {window}: visible-tab query failed: {err}");
                return;
            }
        };
        let mut start = index_of(&tabs, tab_id).unwrap_or(0);
        if start + 1 == tabs.len() {
            start = start.saturating_sub(1);
        }
        self.reconciler.update_from(&tabs, start).await;
    }

    /// A tab left `old_window` for another one. Its old marker bounds how far
    /// back indices can have shifted; unmarked means it sat in the dead zone
    /// past the direct range, where only the new last tab needs revisiting.
    async fn on_detached(&self, tab_id: TabId, old_window: WindowId) {
        let tabs = match self.host.visible_tabs(old_window).await {
            Ok(tabs) => tabs,
            Err(err) => {
                log::warn!("window {old_window}: visible-tab query failed: {err}");
                return;
            }
        };
        let old_ordinal = match self.host.tab(tab_id).await {
            Ok(tab) => tab.title.as_deref().and_then(marker::marked_ordinal),
            Err(err) => {
                log::debug!("detached tab {tab_id} unavailable: {err}");
                None
            }
        };
        let start = old_ordinal.unwrap_or_else(|| tabs.len().saturating_sub(1));
        self.reconciler.update_from(&tabs, start).await;
    }

    /// Removal may be reported before the tab leaves query results. Poll
    /// until it is really gone, then renumber the whole window. The loop has
    /// no upper bound; removal is guaranteed to eventually complete.
    async fn on_removed(&self, tab_id: TabId, window: WindowId) {
        loop {
            match self.host.visible_tabs(window).await {
                Ok(tabs) if index_of(&tabs, tab_id).is_none() => {
                    self.reconciler.update_from(&tabs, 0).await;
                    return;
                }
                Ok(_) => {
                    log::debug!("tab {tab_id}: still visible after removal, polling");
                }
                Err(err) => {
                    log::warn!("window {window}: removal poll query failed: {err}");
                    return;
                }
            }
            tokio::time::sleep(self.timings.removal_poll_interval).await;
        }
    }

    async fn on_title_changed(&self, tab_id: TabId, window: WindowId) {
        if self.reconciler.consume_suppression(tab_id) {
            log::debug!("tab {tab_id}: ignoring echo of our own title write");
            return;
        }
        let tabs = match self.host.visible_tabs(window).await {
            Ok(tabs) => tabs,
            Err(err) => {
                log::warn!("window {window}: visible-tab query failed: {err}");
                return;
            }
        };
        if let Some(index) = index_of(&tabs, tab_id) {
            self.reconciler.reconcile(&tabs[index], index, tabs.len()).await;
        }
    }

    /// Hidden-state churn (a tab-group switch, say) arrives in bursts and
    /// cannot be decomposed into a safe start index. Coalesce each burst
    /// into one delayed full recompute per window.
    async fn on_hidden_changed(&self, window: WindowId) {
        if !self.debounce_pending.lock().insert(window) {
            return;
        }
        tokio::time::sleep(self.timings.debounce_delay).await;
        self.debounce_pending.lock().remove(&window);
        self.reconciler.update_all(window).await;
    }
}

/// Index of `tab_id` within the visible list, by identity.
fn index_of(tabs: &[TabInfo], tab_id: TabId) -> Option<usize> {
    tabs.iter().position(|tab| tab.id == tab_id)
}
