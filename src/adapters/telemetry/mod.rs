//! Remote telemetry sinks.
//!
//! | Sink           | Endpoint                 | Timestamp              |
//! |----------------|--------------------------|------------------------|
//! | `status_store` | `POST /sensor1`          | local `YYYY-MM-DD ...` |
//! | `metrics`      | `POST /<device_label>`   | UTC epoch millis       |
//!
//! Both are best effort: one POST per tick, no retry, no queue.

pub mod http;
pub mod metrics;
pub mod status_store;

pub use metrics::MetricsSink;
pub use status_store::StatusStoreSink;
