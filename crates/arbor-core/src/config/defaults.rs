//! Default values for every configuration key.

pub const DEFAULT_PRIZE: f64 = 1.0;
pub const DEFAULT_CONSIDER_RECENCY: bool = false;
pub const DEFAULT_ALPHA: f64 = 0.2;
pub const DEFAULT_TAU: f64 = 0.8;
pub const DEFAULT_TIME_SCALE: f64 = 1.0;

pub const DEFAULT_BUDGET: f64 = 0.5;
/// Four weeks.
pub const DEFAULT_TIMESPAN_SECS: u64 = 28 * 24 * 60 * 60;
pub const DEFAULT_DECIMAL_PRECISION: u32 = 2;
pub const MAX_DECIMAL_PRECISION: u32 = 12;
pub const DEFAULT_FIXED_POINT: u32 = 1;
pub const DEFAULT_SHORTEST_PATH: bool = false;

pub const DEFAULT_SEED: u64 = 1;
pub const DEFAULT_CANDIDATE_PERCENT: f64 = 0.1;

pub const DEFAULT_LOG_LEVEL: &str = "info";
