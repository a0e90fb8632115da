//! Reducers
//!
//! `task` and `windows` are shared by the host and the embedded container: the
//! same functions run against separate state. `display` is host only. The
//! `mirror` reducers only exist in the embedded container.

pub mod display;
pub mod mirror;
pub mod task;
pub mod windows;

pub use task::TaskState;
pub use windows::{Notification, WindowRegistry};
