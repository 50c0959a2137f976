/// Environment variable pointing at the project root
pub const MIXINT_DIR: &str = "MIXINT_DIR";

/// Directory (relative to the project root) holding generated data
pub const DATA_GENERATED: &str = "data_generated";

/// Subdirectory of `DATA_GENERATED` receiving sweep reports
pub const OUTPUT: &str = "output";

/// Output directory used when `MIXINT_DIR` is not configured
pub const FALLBACK_OUTPUT: &str = "./output";
