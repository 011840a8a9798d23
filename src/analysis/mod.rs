pub mod cooldown;
pub mod hit_count;
pub mod metrics;
pub mod segments;
pub mod thresholds;
