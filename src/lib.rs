// Public modules
pub mod types;
pub mod error;
pub mod config;
pub mod parsing;
pub mod kubernetes;
pub mod topology;
pub mod collector;
pub mod report;
pub mod sink;
pub mod cycle;

// Re-export commonly used items
pub use types::*;
pub use error::{ConfigError, FetchError, SinkError};
pub use config::{load_config, load_config_with_env, parse_metric_definitions, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use parsing::{parse_exposition, parse_line};
pub use kubernetes::{retry_with_budget, KubeApiClient, MAX_ATTEMPTS, REQUEST_TIMEOUT};
pub use collector::TopologyCollector;
pub use report::{derive_element_metrics, is_reportable, report_topology, ReportSummary, TopologyReporter};
pub use sink::{DryRunSink, ElementHandle, GroupHandle, JsonLinesSink, MemorySink, SinkRecord, TopologySink};
pub use cycle::run_cycle;
