//! Editor action tracking.
//!
//! [`EditorActionTracker`] is the single consumer of host editor events. For
//! every accepted text or selection change it records the event in the
//! [`EditorStateManager`], runs each enabled detector in registration order
//! and hands matches to a [`Notifier`]. Alongside it keeps:
//! - a [`CommandLedger`] of recent command executions, which detectors read to
//!   avoid suggesting a shortcut that was just used
//! - [`MouseState`], so selections made by dragging are not judged as keyboard habits

mod config;
mod event;
mod ledger;
mod mouse;
mod notifier;
mod state;
mod tracker;

pub use config::TrackerConfig;
pub use event::{ActiveEditor, HostEvent, TextChange};
pub use ledger::{CommandLedger, INLINE_EXECUTIONS};
pub use mouse::MouseState;
pub use notifier::{Notifier, NotifyFn};
pub use state::EditorStateManager;
pub use tracker::{EditorActionTracker, RunState};
