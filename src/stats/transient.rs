//! 瞬态阶段检测
//!
//! 截尾均值法：对每个截断位置 k，计算从 k 到序列末尾的均值与整体均值的相对偏差
//! `R_k`，再在 `R_k` 曲线上找“拐点”（到首尾连线垂直距离最大的点）。拐点之后的
//! bin 视为稳态。

use super::bin::{Bin, BinMetric};
use super::moments::mean_and_std;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 检测参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransientParams {
    /// 有活动的 bin 少于该值时不做检测
    pub min_valid_bins: usize,
    /// 少于该值时不找拐点，整段视为稳态
    pub min_detect_bins: usize,
    /// 拐点距离低于该值时认为曲线近似直线
    pub flat_threshold: f64,
}

impl Default for TransientParams {
    fn default() -> Self {
        Self {
            min_valid_bins: 10,
            min_detect_bins: 20,
            flat_threshold: 0.01,
        }
    }
}

/// 一个指标的瞬态检测结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransientEstimate {
    pub metric: BinMetric,
    /// 瞬态结束处的原始 bin 下标
    pub transient_end_bin: usize,
    /// 该 bin 的时间（分钟）
    pub transient_end_time: f64,
    pub steady_state_mean: f64,
    pub steady_state_std: f64,
    pub steady_state_bins: usize,
    /// 数据不足以找拐点，整段当作稳态
    pub whole_series: bool,
}

/// 使用默认参数检测
pub fn detect_transient(bins: &[Bin], metric: BinMetric) -> Option<TransientEstimate> {
    detect_transient_with(bins, metric, TransientParams::default())
}

pub fn detect_transient_with(
    bins: &[Bin],
    metric: BinMetric,
    params: TransientParams,
) -> Option<TransientEstimate> {
    if bins.len() < params.min_valid_bins {
        return None;
    }

    // 最后一个 bin 可能不完整
    let analyzed = if bins.len() > 1 { &bins[..bins.len() - 1] } else { bins };
    let (indices, values): (Vec<usize>, Vec<f64>) = analyzed
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_active())
        .map(|(i, b)| (i, b.metric(metric)))
        .unzip();

    if values.len() < params.min_valid_bins {
        return None;
    }

    let estimate = |start: usize, whole_series: bool| {
        let steady = &values[start..];
        let (mean, std) = mean_and_std(steady);
        let end_bin = indices[start];
        TransientEstimate {
            metric,
            transient_end_bin: end_bin,
            transient_end_time: bins[end_bin].time,
            steady_state_mean: mean,
            steady_state_std: std,
            steady_state_bins: steady.len(),
            whole_series,
        }
    };

    let n = values.len();
    if n < params.min_detect_bins {
        debug!(metric = ?metric, active_bins = n, "bin 数不足，整段视为稳态");
        return Some(estimate(0, true));
    }

    let curve = relative_variation_curve(&values, params.min_valid_bins);
    let knee = find_knee_point_with(&curve, params.flat_threshold);
    debug!(metric = ?metric, curve_len = curve.len(), knee, "瞬态拐点");

    if knee < n {
        Some(estimate(knee, false))
    } else {
        Some(estimate(0, true))
    }
}

/// `R_k` 曲线，k 取 `[0, L - min_valid_bins)`，`L = min(n, max(50, n / 2))`
pub fn relative_variation_curve(values: &[f64], min_valid_bins: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let analysis_len = n.min(50.max(n / 2));
    let overall = values.iter().sum::<f64>() / n as f64;
    let overall = if overall.abs() < 1e-10 { 1e-10 } else { overall };

    let max_k = analysis_len.saturating_sub(min_valid_bins);
    // 后缀和，使每个截尾均值 O(1)
    let mut suffix = vec![0.0; n + 1];
    for i in (0..n).rev() {
        suffix[i] = suffix[i + 1] + values[i];
    }
    (0..max_k)
        .map(|k| {
            let truncated = suffix[k] / (n - k) as f64;
            (truncated - overall).abs() / overall.abs()
        })
        .collect()
}

/// 曲线拐点：到首尾连线垂直距离最大的内部点
pub fn find_knee_point(curve: &[f64]) -> usize {
    find_knee_point_with(curve, TransientParams::default().flat_threshold)
}

fn find_knee_point_with(curve: &[f64], flat_threshold: f64) -> usize {
    let n = curve.len();
    if n < 3 {
        return 0;
    }

    let (x1, y1) = (0.0, curve[0]);
    let (x2, y2) = ((n - 1) as f64, curve[n - 1]);
    let a = y2 - y1;
    let b = -(x2 - x1);
    let c = (x2 - x1) * y1 - (y2 - y1) * x1;
    let denom = (a * a + b * b).sqrt();
    if denom < 1e-10 {
        return 0;
    }

    let mut best = (0, -1.0);
    for (i, &y) in curve.iter().enumerate().take(n - 1).skip(1) {
        let d = (a * i as f64 + b * y + c).abs() / denom;
        if d > best.1 {
            best = (i, d);
        }
    }

    if best.1 < flat_threshold {
        return 5.min(n / 10);
    }
    best.0
}
