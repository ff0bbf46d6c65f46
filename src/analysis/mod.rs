pub mod performance;
pub mod report;
pub mod roles;

pub use performance::PerformanceAnalyzer;
pub use report::PerformanceReport;
