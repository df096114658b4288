//! Host seam: the tab-management environment the reconciler observes.
//!
//! Everything the core needs from the surrounding tab environment sits behind
//! [`TabHost`]: ordered visible-tab queries, single-tab lookup, window
//! enumeration, and the fallible title rewrite. Lifecycle notifications
//! arrive as [`TabEvent`] values; a host adapter translates its native
//! listener callbacks into these and feeds them to the coordinator.

use async_trait::async_trait;
use thiserror::Error;

/// Unique identifier for a tab, assigned by the host.
pub type TabId = u64;

/// Unique identifier for a window, assigned by the host.
pub type WindowId = u64;

/// Snapshot of the host attributes the core reads from a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub id: TabId,
    pub window_id: WindowId,
    /// Displayed title; `None` while the tab has not loaded one yet.
    pub title: Option<String>,
    /// Hidden tabs never appear in visible lists but can still be fetched by id.
    pub hidden: bool,
}

/// Lifecycle notification delivered by the host adapter.
#[derive(Debug, Clone)]
pub enum TabEvent {
    /// A tab was created.
    Created(TabInfo),
    /// A tab was attached to a window (dragged in from another one).
    Attached { tab_id: TabId, new_window_id: WindowId },
    /// A tab was detached from a window (dragged out).
    Detached { tab_id: TabId, old_window_id: WindowId },
    /// A tab was moved within its window.
    Moved { tab_id: TabId, window_id: WindowId },
    /// A tab was removed. The host may report this before the tab actually
    /// disappears from queries.
    Removed { tab_id: TabId, window_id: WindowId },
    /// A tab's displayed title changed.
    TitleChanged { tab_id: TabId, window_id: WindowId },
    /// One or more tabs in the window changed hidden state (e.g. a tab-group
    /// switch). These arrive in bursts.
    HiddenChanged { window_id: WindowId },
}

/// Errors surfaced by host operations.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("tab {0} not found")]
    TabNotFound(TabId),
    #[error("tab query failed: {0}")]
    Query(String),
    #[error("title rewrite rejected: {0}")]
    RewriteRejected(String),
}

/// Capabilities the reconciliation core consumes from the host.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// The window's non-hidden tabs, ordered left to right on screen.
    async fn visible_tabs(&self, window: WindowId) -> Result<Vec<TabInfo>, HostError>;

    /// Fetch a single tab by id, hidden or not.
    async fn tab(&self, id: TabId) -> Result<TabInfo, HostError>;

    /// All currently open windows.
    async fn windows(&self) -> Result<Vec<WindowId>, HostError>;

    /// Request that the tab's displayed title be replaced.
    ///
    /// May fail or silently no-op for privileged tabs; callers treat this as
    /// fire-and-forget and never retry.
    async fn set_title(&self, tab: TabId, title: &str) -> Result<(), HostError>;
}
