//! 置信区间
//!
//! 批均值法：把每个有活动的 bin 看作一个近似独立的样本。
//! 周期平稳分析按 bin 在周期（默认一天）中的相位分组，每组单独求区间。

use super::bin::{Bin, BinMetric};
use super::moments::{mean, sample_variance};
use serde::{Deserialize, Serialize};

/// 批均值最少需要的有效 bin 数
pub const MIN_BATCHES: usize = 5;
/// 每个相位最少样本数
pub const MIN_PHASE_SAMPLES: usize = 3;

/// `(mean, half_width, lower, upper)` 与样本数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub half_width: f64,
    pub lower: f64,
    pub upper: f64,
    pub n: usize,
}

impl ConfidenceInterval {
    /// 由样本直接计算；样本数不足 `min_samples` 时返回 `None`
    pub fn from_samples(values: &[f64], confidence: f64, min_samples: usize) -> Option<Self> {
        let n = values.len();
        if n < min_samples.max(1) {
            return None;
        }
        let m = mean(values);
        let std_err = (sample_variance(values) / n as f64).sqrt();
        let half_width = critical_value(confidence, n) * std_err;
        Some(Self {
            mean: m,
            half_width,
            lower: m - half_width,
            upper: m + half_width,
            n,
        })
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

/// 近似临界值：大样本取正态分位数，小样本适当放宽
pub fn critical_value(confidence: f64, n: usize) -> f64 {
    let large = n >= 30;
    let is = |level: f64| (confidence - level).abs() < 1e-9;
    if is(0.95) {
        if large { 1.96 } else { 2.0 + (30 - n) as f64 * 0.1 / 30.0 }
    } else if is(0.90) {
        if large { 1.645 } else { 1.8 }
    } else if is(0.99) {
        if large { 2.576 } else { 3.0 }
    } else {
        2.0
    }
}

/// 在 bin 区间 `[start, end)` 上对某指标求置信区间（`end` 为空表示到末尾）
pub fn compute_confidence_interval(
    bins: &[Bin],
    metric: BinMetric,
    confidence: f64,
    start: usize,
    end: Option<usize>,
) -> Option<ConfidenceInterval> {
    let end = end.unwrap_or(bins.len()).min(bins.len());
    let slice = bins.get(start..end)?;
    let values: Vec<f64> = slice
        .iter()
        .filter(|b| b.is_active())
        .map(|b| b.metric(metric))
        .collect();
    ConfidenceInterval::from_samples(&values, confidence, MIN_BATCHES)
}

/// 一个周期相位上的区间估计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseInterval {
    pub phase: usize,
    /// 相位起点距周期起点的分钟数
    pub phase_time_minutes: f64,
    pub mean: f64,
    pub half_width: f64,
    pub lower: f64,
    pub upper: f64,
    pub n_samples: usize,
    pub std: f64,
}

/// 按相位分组求区间，结果按相位升序
pub fn cycle_stationary_intervals(
    bins: &[Bin],
    metric: BinMetric,
    bin_interval: f64,
    cycle_length: f64,
    confidence: f64,
) -> Vec<PhaseInterval> {
    if !(bin_interval > 0.0 && cycle_length > 0.0) {
        return Vec::new();
    }
    let bins_per_cycle = ((cycle_length / bin_interval).floor() as usize).max(1);
    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); bins_per_cycle];
    for b in bins.iter().filter(|b| b.is_active()) {
        let phase = (b.time.rem_euclid(cycle_length) / bin_interval).floor() as usize % bins_per_cycle;
        groups[phase].push(b.metric(metric));
    }

    groups
        .iter()
        .enumerate()
        .filter_map(|(phase, values)| {
            let ci = ConfidenceInterval::from_samples(values, confidence, MIN_PHASE_SAMPLES)?;
            Some(PhaseInterval {
                phase,
                phase_time_minutes: phase as f64 * bin_interval,
                mean: ci.mean,
                half_width: ci.half_width,
                lower: ci.lower,
                upper: ci.upper,
                n_samples: ci.n,
                std: sample_variance(values).sqrt(),
            })
        })
        .collect()
}
