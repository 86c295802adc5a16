use crate::config::{SimConfig, SystemType};
use crate::stats::{AnalysisReport, Bin, BinMetric};

fn bin(time: f64, ok: u64, failed: u64) -> Bin {
    Bin {
        time,
        successful_reservations: ok,
        failed_reservations: failed,
        trips: ok,
        trip_distance: 3.0 * ok as f64,
        attempts: ok + failed,
        in_use_time: 20.0,
        charging_time: 5.0,
        car_time: 60.0,
        wait_time: 0.0,
        walking_time: 0.0,
        charging_sessions: 0,
    }
}

fn hourly(n: usize) -> Vec<Bin> {
    (0..n)
        .map(|i| bin(60.0 * (i + 1) as f64, 3 + (i % 2) as u64, 1))
        .collect()
}

#[test]
fn sparse_runs_only_warn() {
    let report = AnalysisReport::analyze(&hourly(10), &SimConfig::default());
    // 最后一个 bin 不计入
    assert_eq!(report.bins_analyzed, 9);
    assert_eq!(report.active_bins, 9);
    assert!(report.warning.as_deref().is_some_and(|w| w.contains("insufficient")));
    assert!(report.transients.is_empty());
    assert!(report.cycle_intervals.is_empty());
}

#[test]
fn stationary_report_covers_every_metric() {
    let report = AnalysisReport::analyze(&hourly(48), &SimConfig::default());
    assert!(report.warning.is_none());
    assert_eq!(report.system_type, SystemType::Stationary);
    let metrics: Vec<BinMetric> = report.transients.iter().map(|t| t.metric).collect();
    assert_eq!(metrics, BinMetric::ALL.to_vec());
    assert!(report.cycle_intervals.is_empty());

    let distance = report
        .transients
        .iter()
        .find(|t| t.metric == BinMetric::AvgTripDistance)
        .expect("distance estimate");
    assert!((distance.steady_state_mean - 3.0).abs() < 1e-9);
}

#[test]
fn cycle_stationary_report_has_daily_phases() {
    let cfg = SimConfig {
        system_type: SystemType::CycleStationary,
        bin_interval: 60.0,
        ..SimConfig::default()
    };
    let report = AnalysisReport::analyze(&hourly(24 * 4), &cfg);
    assert!(report.transients.is_empty());
    assert_eq!(report.cycle_intervals.len(), 3);
    for m in &report.cycle_intervals {
        assert_eq!(m.phases.len(), 24, "metric {:?}", m.metric);
        assert!(m.phases.iter().all(|p| p.n_samples == 4));
    }
    let util = &report.cycle_intervals[2];
    assert_eq!(util.metric, BinMetric::UtilizationRate);
    assert!(util.phases.iter().all(|p| (p.mean - 1.0 / 3.0).abs() < 1e-12));
}
