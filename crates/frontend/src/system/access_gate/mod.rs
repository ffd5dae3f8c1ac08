//! Password overlay in front of the key form, with its session marker and
//! the monitor that reloads the page if the overlay is removed.

pub mod context;
pub mod monitor;
pub mod overlay;
pub mod storage;

pub use context::{use_gate, GateContext};
pub use monitor::start_tamper_monitor;
pub use overlay::AccessGateOverlay;
