/// Fallback discipline size when the first booking of a discipline is
/// created before anyone knows the real workload.
pub const DEFAULT_TOTAL_UNITS: i64 = 8;

/// Lesson-units a scheduler pencils in for a single session.
pub const DEFAULT_RECORDED_UNITS: i64 = 4;
