//! Common constants used throughout ndc.

/// Namespace prefixed to every container image repository.
pub const REGISTRY_NAMESPACE: &str = "noundry";

/// Region used when a template root has no region of its own.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Framework moniker used when none is given.
pub const DEFAULT_FRAMEWORK: &str = "net9.0";

/// Port the generated service listens on by default.
pub const DEFAULT_PORT: i64 = 8080;

pub const DEFAULT_MIN_INSTANCES: i64 = 1;
pub const DEFAULT_MAX_INSTANCES: i64 = 5;
