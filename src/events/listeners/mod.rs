//! Built-in event listeners.
//!
//! These listeners provide common functionality out of the box.
//! Use them with [`register_event_listeners`](super::register_event_listeners).

mod logging;

pub use logging::LoggingListener;
