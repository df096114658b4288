//! Shared integration test helpers: a scripted in-memory tab host.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::MockHost;
//! ```
//!
//! Note: Rust integration tests use `mod common;` (not `use`) to bring in
//! helpers from `tests/common/mod.rs`. The `#[allow(dead_code)]` attribute
//! suppresses warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tab_ordinals::{HostError, TabHost, TabId, TabInfo, WindowId};

/// In-memory [`TabHost`] whose tab list tests mutate directly.
///
/// `set_title` applies the write to the stored tab (as a page committing the
/// title would) and records it in a write log, so tests can assert both the
/// final titles and exactly which tabs were touched.
pub struct MockHost {
    state: Mutex<MockState>,
}

struct MockState {
    /// All tabs across all windows; per-window order is the filtered order.
    tabs: Vec<TabInfo>,
    /// Every accepted `set_title` call, in order.
    writes: Vec<(TabId, String)>,
    /// Tabs whose rewrites the host rejects (privileged tabs).
    reject: HashSet<TabId>,
    /// When set, visible-tab and window queries fail outright.
    fail_queries: bool,
}

impl MockHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState {
                tabs: Vec::new(),
                writes: Vec::new(),
                reject: HashSet::new(),
                fail_queries: false,
            }),
        })
    }

    /// Append `count` visible tabs to `window`, ids starting at `first_id`,
    /// titled "Tab <id>".
    pub fn with_window(&self, window: WindowId, first_id: TabId, count: usize) {
        for n in 0..count as u64 {
            self.add_tab(first_id + n, window, Some(&format!("Tab {}", first_id + n)));
        }
    }

    /// Append `count` visible tabs to `window` whose titles already carry the
    /// correct marker for their position, so a pass over them is a no-op.
    pub fn with_marked_window(&self, window: WindowId, first_id: TabId, count: usize) {
        for i in 0..count {
            let id = first_id + i as u64;
            let base = format!("Tab {id}");
            let title = match tab_ordinals::decide(Some(&base), i, count) {
                tab_ordinals::TitleDecision::Rewrite(marked) => marked,
                tab_ordinals::TitleDecision::Noop => base,
            };
            self.add_tab(id, window, Some(&title));
        }
    }

    pub fn add_tab(&self, id: TabId, window: WindowId, title: Option<&str>) {
        self.state.lock().tabs.push(TabInfo {
            id,
            window_id: window,
            title: title.map(str::to_string),
            hidden: false,
        });
    }

    pub fn remove_tab(&self, id: TabId) {
        self.state.lock().tabs.retain(|tab| tab.id != id);
    }

    /// Move a tab to another window, appending it at the end there.
    pub fn transfer_tab(&self, id: TabId, window: WindowId) {
        let mut state = self.state.lock();
        if let Some(pos) = state.tabs.iter().position(|tab| tab.id == id) {
            let mut tab = state.tabs.remove(pos);
            tab.window_id = window;
            state.tabs.push(tab);
        }
    }

    pub fn set_hidden(&self, id: TabId, hidden: bool) {
        let mut state = self.state.lock();
        if let Some(tab) = state.tabs.iter_mut().find(|tab| tab.id == id) {
            tab.hidden = hidden;
        }
    }

    /// Overwrite a tab's stored title without going through `set_title`,
    /// as a page navigation would.
    pub fn set_title_externally(&self, id: TabId, title: &str) {
        let mut state = self.state.lock();
        if let Some(tab) = state.tabs.iter_mut().find(|tab| tab.id == id) {
            tab.title = Some(title.to_string());
        }
    }

    /// Make `set_title` fail for this tab from now on.
    pub fn reject_writes_for(&self, id: TabId) {
        self.state.lock().reject.insert(id);
    }

    /// Make visible-tab and window queries fail until cleared.
    pub fn fail_queries(&self, fail: bool) {
        self.state.lock().fail_queries = fail;
    }

    pub fn title(&self, id: TabId) -> Option<String> {
        self.state
            .lock()
            .tabs
            .iter()
            .find(|tab| tab.id == id)
            .and_then(|tab| tab.title.clone())
    }

    /// Current titles of the window's visible tabs, in order.
    pub fn titles(&self, window: WindowId) -> Vec<String> {
        self.state
            .lock()
            .tabs
            .iter()
            .filter(|tab| tab.window_id == window && !tab.hidden)
            .map(|tab| tab.title.clone().unwrap_or_default())
            .collect()
    }

    /// Synchronous copy of the window's visible list, for driving
    /// `update_from` directly.
    pub fn visible_tabs_snapshot(&self, window: WindowId) -> Vec<TabInfo> {
        self.state
            .lock()
            .tabs
            .iter()
            .filter(|tab| tab.window_id == window && !tab.hidden)
            .cloned()
            .collect()
    }

    pub fn writes(&self) -> Vec<(TabId, String)> {
        self.state.lock().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.state.lock().writes.len()
    }

    /// Forget recorded writes, so tests can assert deltas after setup passes.
    pub fn clear_writes(&self) {
        self.state.lock().writes.clear();
    }

    /// Ids of tabs that received at least one write.
    pub fn written_ids(&self) -> HashSet<TabId> {
        self.state.lock().writes.iter().map(|(id, _)| *id).collect()
    }
}

#[async_trait]
impl TabHost for MockHost {
    async fn visible_tabs(&self, window: WindowId) -> Result<Vec<TabInfo>, HostError> {
        let state = self.state.lock();
        if state.fail_queries {
            return Err(HostError::Query(format!("window {window} unavailable")));
        }
        Ok(state
            .tabs
            .iter()
            .filter(|tab| tab.window_id == window && !tab.hidden)
            .cloned()
            .collect())
    }

    async fn tab(&self, id: TabId) -> Result<TabInfo, HostError> {
        self.state
            .lock()
            .tabs
            .iter()
            .find(|tab| tab.id == id)
            .cloned()
            .ok_or(HostError::TabNotFound(id))
    }

    async fn windows(&self) -> Result<Vec<WindowId>, HostError> {
        let state = self.state.lock();
        if state.fail_queries {
            return Err(HostError::Query("window enumeration unavailable".into()));
        }
        let mut windows = Vec::new();
        for tab in &state.tabs {
            if !windows.contains(&tab.window_id) {
                windows.push(tab.window_id);
            }
        }
        Ok(windows)
    }

    async fn set_title(&self, tab: TabId, title: &str) -> Result<(), HostError> {
        let mut state = self.state.lock();
        if state.reject.contains(&tab) {
            return Err(HostError::RewriteRejected(format!(
                "tab {tab} is privileged"
            )));
        }
        if let Some(entry) = state.tabs.iter_mut().find(|t| t.id == tab) {
            entry.title = Some(title.to_string());
        }
        state.writes.push((tab, title.to_string()));
        Ok(())
    }
}
