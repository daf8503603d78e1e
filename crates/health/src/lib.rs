//! Health and readiness aggregation over downstream services.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod checker;
mod readiness;
mod report;

pub use checker::{HealthChecker, HealthCheckerOptions, default_targets};
pub use readiness::{
    CheckStatus, ReadinessCheck, ReadinessChecker, ReadinessCheckerOptions, ReadinessReport,
    is_ready,
};
pub use report::{
    CpuHealth, DiskHealth, HealthReport, HealthStatus, MemoryHealth, SystemHealth, overall_status,
};
