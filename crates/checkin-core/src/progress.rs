//! Attendance progress toward capacity.

use serde::{Deserialize, Serialize};

/// Capacity band of the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    Plenty,
    Busy,
    AlmostFull,
    Critical,
}

impl ProgressBand {
    pub fn for_percentage(pct: f64) -> Self {
        if pct < 40.0 {
            ProgressBand::Plenty
        } else if pct < 70.0 {
            ProgressBand::Busy
        } else if pct < 90.0 {
            ProgressBand::AlmostFull
        } else {
            ProgressBand::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProgressBand::Plenty => "plenty",
            ProgressBand::Busy => "busy",
            ProgressBand::AlmostFull => "almost full",
            ProgressBand::Critical => "critical",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ProgressBand::Plenty => "#10b981",
            ProgressBand::Busy => "#3b82f6",
            ProgressBand::AlmostFull => "#f59e0b",
            ProgressBand::Critical => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub total: usize,
    pub capacity: usize,
    /// 0.0 ..= 100.0
    pub percentage: f64,
    pub band: ProgressBand,
}

impl Progress {
    pub fn new(total: usize, capacity: usize) -> Self {
        let percentage = if capacity == 0 {
            0.0
        } else {
            (total as f64 / capacity as f64 * 100.0).min(100.0)
        };
        Self {
            total,
            capacity,
            percentage,
            band: ProgressBand::for_percentage(percentage),
        }
    }
}
