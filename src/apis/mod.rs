pub mod terminal;
pub mod metric;
pub mod monitoring;
pub mod system;

// Re-export all APIs
pub use terminal::TerminalApi;
pub use metric::MetricApi;
pub use monitoring::MonitoringApi;
pub use system::SystemApi;
