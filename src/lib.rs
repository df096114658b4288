//! Positional ordinal markers for tab titles.
//!
//! Overlays an invisible-separator + superscript-digit prefix onto the title
//! of each visible tab so fixed keyboard shortcuts can reach tabs by
//! position: the first eight positions each carry their own glyph, and when
//! more tabs are open the last one always carries the ninth "go to last"
//! glyph. The crate observes an external tab environment through
//! [`host::TabHost`], decides per tab whether its title needs a marker added,
//! changed, or removed, and never rewrites a title that is already correct.
//!
//! Structure:
//! - [`marker`]: pure codec for the two-unit title prefix
//! - [`position`]: pure index → desired-marker mapping
//! - [`reconciler`]: per-tab decisions, title writes, echo suppression
//! - [`coordinator`]: lifecycle-event dispatch, debouncing, removal polling
//! - [`bookmark`]: marker cleanup for bookmarks created from marked tabs
//!
//! All timers and background work run on tokio; the coordinator must be
//! driven from within a tokio runtime.

pub mod bookmark;
pub mod coordinator;
pub mod host;
pub mod marker;
pub mod position;
pub mod reconciler;

mod batch;

pub use coordinator::{Coordinator, Timings};
pub use host::{HostError, TabEvent, TabHost, TabId, TabInfo, WindowId};
pub use reconciler::{Reconciler, TitleDecision, decide};
