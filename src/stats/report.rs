//! 运行结束后的统计分析报告
//!
//! 平稳系统：对每个指标做瞬态检测；周期平稳系统：按一天中的相位给出置信区间。

use super::bin::{Bin, BinMetric};
use super::confidence::{PhaseInterval, cycle_stationary_intervals};
use super::transient::{TransientEstimate, detect_transient};
use super::windows::{
    DEFAULT_VARIATION_THRESHOLD, DEFAULT_WINDOW_SIZE, StationaryWindow, detect_stationary_windows,
};
use crate::config::{SimConfig, SystemType};
use crate::sim::{MINUTES_PER_DAY, format_duration};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// 报告至少需要的有活动 bin 数
pub const MIN_REPORT_BINS: usize = 10;

/// 一个指标在各相位上的区间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPhases {
    pub metric: BinMetric,
    pub phases: Vec<PhaseInterval>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub system_type: SystemType,
    /// 参与分析的 bin 数（不含最后一个不完整的 bin）
    pub bins_analyzed: usize,
    pub active_bins: usize,
    /// 数据不足时的提示；此时其余字段为空
    pub warning: Option<String>,
    pub transients: Vec<TransientEstimate>,
    /// 成功率上的局部平稳窗口
    pub stationary_windows: Vec<StationaryWindow>,
    pub cycle_intervals: Vec<MetricPhases>,
}

const CYCLE_METRICS: [BinMetric; 3] = [
    BinMetric::SuccessRate,
    BinMetric::AvgAttempts,
    BinMetric::UtilizationRate,
];

impl AnalysisReport {
    pub fn analyze(bins: &[Bin], cfg: &SimConfig) -> AnalysisReport {
        let analyzed = if bins.len() > 1 { &bins[..bins.len() - 1] } else { bins };
        let active_bins = analyzed.iter().filter(|b| b.is_active()).count();
        let mut report = AnalysisReport {
            system_type: cfg.system_type,
            bins_analyzed: analyzed.len(),
            active_bins,
            warning: None,
            transients: Vec::new(),
            stationary_windows: Vec::new(),
            cycle_intervals: Vec::new(),
        };

        if active_bins < MIN_REPORT_BINS {
            report.warning = Some(format!(
                "insufficient bins with activity for statistical analysis ({active_bins} < {MIN_REPORT_BINS}); \
                 increase simulation time or user arrival rate"
            ));
            return report;
        }

        match cfg.system_type {
            SystemType::Stationary => {
                report.transients = BinMetric::ALL
                    .iter()
                    .filter_map(|&m| detect_transient(bins, m))
                    .collect();
                report.stationary_windows = detect_stationary_windows(
                    bins,
                    BinMetric::SuccessRate,
                    DEFAULT_WINDOW_SIZE,
                    DEFAULT_VARIATION_THRESHOLD,
                );
            }
            SystemType::CycleStationary => {
                report.cycle_intervals = CYCLE_METRICS
                    .iter()
                    .map(|&metric| MetricPhases {
                        metric,
                        phases: cycle_stationary_intervals(
                            bins,
                            metric,
                            cfg.bin_interval,
                            MINUTES_PER_DAY,
                            cfg.confidence_level,
                        ),
                    })
                    .collect();
            }
        }
        report
    }

    /// 把报告写入日志
    pub fn log(&self) {
        info!(
            bins_analyzed = self.bins_analyzed,
            active_bins = self.active_bins,
            system_type = ?self.system_type,
            "📊 统计分析"
        );
        if let Some(w) = &self.warning {
            warn!("{w}");
            return;
        }

        for t in &self.transients {
            info!(
                metric = t.metric.label(),
                transient_end_bin = t.transient_end_bin,
                transient_end = %format_duration(t.transient_end_time),
                steady_mean = t.steady_state_mean,
                steady_std = t.steady_state_std,
                steady_bins = t.steady_state_bins,
                "瞬态检测"
            );
        }
        for w in &self.stationary_windows {
            info!(start = w.start, end = w.end, mean = w.mean, std = w.std, "平稳窗口");
        }
        for mp in &self.cycle_intervals {
            if mp.phases.is_empty() {
                info!(metric = mp.metric.label(), "各相位样本不足");
                continue;
            }
            for p in &mp.phases {
                info!(
                    metric = mp.metric.label(),
                    phase = p.phase,
                    hour = (p.phase_time_minutes / 60.0).floor() as u32,
                    mean = p.mean,
                    lower = p.lower,
                    upper = p.upper,
                    n = p.n_samples,
                    "相位置信区间"
                );
            }
        }
    }
}
