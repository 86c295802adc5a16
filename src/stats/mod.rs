//! 统计模块
//!
//! 此模块包含运行期的计数与分箱，以及运行结束后的瞬态检测、置信区间与摘要导出。

// 子模块声明
mod bin;
mod confidence;
mod engine;
mod moments;
mod report;
mod summary;
mod transient;
mod windows;

// 重新导出公共接口
pub use bin::{Bin, BinMetric, Snapshot, TimeBuckets, metric_series};
pub use confidence::{
    ConfidenceInterval, MIN_BATCHES, MIN_PHASE_SAMPLES, PhaseInterval, compute_confidence_interval,
    critical_value, cycle_stationary_intervals,
};
pub use engine::StatsEngine;
pub use moments::{mean, mean_and_std, population_variance, sample_variance};
pub use report::{AnalysisReport, MIN_REPORT_BINS, MetricPhases};
pub use summary::{SummaryMetrics, format_distance, pct};
pub use transient::{
    TransientEstimate, TransientParams, detect_transient, detect_transient_with, find_knee_point,
    relative_variation_curve,
};
pub use windows::{
    DEFAULT_VARIATION_THRESHOLD, DEFAULT_WINDOW_SIZE, StationaryWindow, detect_stationary_windows,
};
