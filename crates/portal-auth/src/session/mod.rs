//! Client-side session lifecycle.

pub mod monitor;

pub use monitor::{MonitorAction, MonitorSettings, SessionMonitor};
