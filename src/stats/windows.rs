//! 局部平稳窗口
//!
//! 对非平稳系统，用滑动窗口找出指标变化缓慢、可局部视为平稳的时间段。

use super::bin::{Bin, BinMetric};
use super::moments::{mean, population_variance};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_SIZE: usize = 5;
pub const DEFAULT_VARIATION_THRESHOLD: f64 = 0.15;

/// 一个平稳窗口；`start`/`end` 为有活动 bin 序列中的下标（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationaryWindow {
    pub start: usize,
    pub end: usize,
    pub mean: f64,
    pub std: f64,
}

// 变异系数；均值接近 0 时改用方差
fn variation(values: &[f64]) -> f64 {
    let m = mean(values);
    let var = population_variance(values);
    if m > 0.01 { var.sqrt() / m } else { var }
}

pub fn detect_stationary_windows(
    bins: &[Bin],
    metric: BinMetric,
    window_size: usize,
    threshold: f64,
) -> Vec<StationaryWindow> {
    let values: Vec<f64> = bins
        .iter()
        .filter(|b| b.is_active())
        .map(|b| b.metric(metric))
        .collect();
    if window_size == 0 || values.len() < window_size {
        return Vec::new();
    }

    let mut windows = Vec::new();
    let mut i = 0;
    while i + window_size <= values.len() {
        if variation(&values[i..i + window_size]) > threshold {
            i += 1;
            continue;
        }
        // 尽量向后延伸
        let mut end = i + window_size;
        while end < values.len() && variation(&values[i..=end]) <= threshold {
            end += 1;
        }
        let w = &values[i..end];
        windows.push(StationaryWindow {
            start: i,
            end: end - 1,
            mean: mean(w),
            std: population_variance(w).sqrt(),
        });
        i = end;
    }
    windows
}
