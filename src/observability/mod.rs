//! Observability for the property API
//!
//! Events are emitted with `tracing`; HTTP requests are traced by the
//! server's `TraceLayer`. This module only installs the subscriber.

mod logger;

pub use logger::{build_filter, init_logging};
