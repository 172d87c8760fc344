mod subscriber;

pub use subscriber::{try_init_subscriber, TelemetryConfig};
