pub mod registry;
pub mod sink;

pub use sink::{MetricsSink, NullSink, RelaySink};
