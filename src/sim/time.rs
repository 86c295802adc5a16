//! 仿真时间类型
//!
//! 定义仿真时间（分钟）及其单位转换与显示格式。

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// 一天的分钟数。
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// 仿真时间（分钟，从仿真开始计）。
///
/// 使用 `f64::total_cmp` 提供全序，以便作为事件队列的键。
#[derive(Debug, Clone, Copy, Default)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    pub fn from_minutes(m: f64) -> SimTime {
        SimTime(m)
    }

    pub fn from_hours(h: f64) -> SimTime {
        SimTime(h * 60.0)
    }

    pub fn minutes(self) -> f64 {
        self.0
    }

    pub fn hours(self) -> f64 {
        self.0 / 60.0
    }

    /// 当天内的分钟数，范围 `[0, 1440)`。
    pub fn minute_of_day(self) -> f64 {
        self.0.rem_euclid(MINUTES_PER_DAY)
    }

    /// 从 `earlier` 到 `self` 经过的分钟数（不会为负）。
    pub fn since(self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    pub fn max(self, other: SimTime) -> SimTime {
        if self >= other { self } else { other }
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 加上一段以分钟计的时长。
impl Add<f64> for SimTime {
    type Output = SimTime;

    fn add(self, minutes: f64) -> SimTime {
        SimTime(self.0 + minutes)
    }
}

impl Sub for SimTime {
    type Output = f64;

    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

/// 显示为 `Day N, HH:MM`。
impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.max(0.0) as u64;
        let days = total / 1440;
        let rem = total % 1440;
        write!(f, "Day {}, {:02}:{:02}", days + 1, rem / 60, rem % 60)
    }
}

/// 把以分钟计的时长格式化为 `Hh MMm`（不带日历）。
pub fn format_duration(minutes: f64) -> String {
    let total = if minutes.is_finite() {
        minutes.round().max(0.0) as u64
    } else {
        0
    };
    format!("{}h {:02}m", total / 60, total % 60)
}
