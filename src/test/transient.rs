use crate::stats::{Bin, BinMetric, detect_transient, find_knee_point, relative_variation_curve};

/// 每个 bin 10 次预约，成功率为 `rate`
fn bin(time: f64, rate: f64) -> Bin {
    let ok = (rate * 10.0).round() as u64;
    Bin {
        time,
        successful_reservations: ok,
        failed_reservations: 10 - ok,
        trips: ok,
        trip_distance: ok as f64 * 2.0,
        attempts: ok,
        in_use_time: 30.0,
        charging_time: 0.0,
        car_time: 60.0,
        wait_time: 0.0,
        walking_time: 0.0,
        charging_sessions: 0,
    }
}

fn series(rates: &[f64]) -> Vec<Bin> {
    rates
        .iter()
        .enumerate()
        .map(|(i, &r)| bin(60.0 * (i + 1) as f64, r))
        .collect()
}

fn idle_bin(time: f64) -> Bin {
    Bin {
        successful_reservations: 0,
        failed_reservations: 0,
        ..bin(time, 0.0)
    }
}

#[test]
fn noisy_warmup_then_plateau_gives_knee_near_ten() {
    let mut rates = vec![0.1, 0.3, 0.2, 0.1, 0.3, 0.2, 0.2, 0.1, 0.3, 0.2];
    rates.extend(std::iter::repeat_n(0.8, 91));
    let bins = series(&rates);

    let est = detect_transient(&bins, BinMetric::SuccessRate).expect("estimate");
    assert!(!est.whole_series);
    assert!((8..=12).contains(&est.transient_end_bin), "knee at {}", est.transient_end_bin);
    assert_eq!(est.transient_end_time, bins[est.transient_end_bin].time);
    assert!((est.steady_state_mean - 0.8).abs() < 1e-9);
    assert!(est.steady_state_std < 1e-9);
    // 最后一个 bin 不参与
    assert_eq!(est.steady_state_bins, 100 - est.transient_end_bin);
}

#[test]
fn flat_series_uses_small_default_offset() {
    let bins = series(&[0.5; 101]);
    let est = detect_transient(&bins, BinMetric::SuccessRate).expect("estimate");
    assert_eq!(est.transient_end_bin, 4);
    assert!(!est.whole_series);
    assert_eq!(est.steady_state_mean, 0.5);
}

#[test]
fn too_few_bins_yield_nothing() {
    assert!(detect_transient(&series(&[0.5; 9]), BinMetric::SuccessRate).is_none());

    // 总数够，但有活动的 bin 不足
    let mut bins: Vec<Bin> = (0..30).map(|i| idle_bin(60.0 * i as f64)).collect();
    for b in bins.iter_mut().take(5) {
        *b = bin(b.time, 0.5);
    }
    assert!(detect_transient(&bins, BinMetric::SuccessRate).is_none());
}

#[test]
fn short_series_is_taken_whole() {
    let bins = series(&[0.4, 0.6, 0.5, 0.5, 0.7, 0.3, 0.5, 0.5, 0.6, 0.4, 0.5, 0.5, 0.5, 0.6, 0.4, 0.9]);
    let est = detect_transient(&bins, BinMetric::SuccessRate).expect("estimate");
    assert!(est.whole_series);
    assert_eq!(est.transient_end_bin, 0);
    assert_eq!(est.steady_state_bins, 15);
    assert!((est.steady_state_mean - 0.5).abs() < 1e-9);
}

#[test]
fn inactive_bins_are_skipped_but_indices_refer_to_raw_bins() {
    let mut bins = Vec::new();
    for i in 0..60 {
        let t = 60.0 * (i + 1) as f64;
        if i % 2 == 0 {
            bins.push(idle_bin(t));
        } else {
            bins.push(bin(t, if i < 20 { 0.1 } else { 0.9 }));
        }
    }
    let est = detect_transient(&bins, BinMetric::SuccessRate).expect("estimate");
    assert!(bins[est.transient_end_bin].is_active());
    assert_eq!(est.transient_end_bin % 2, 1);
}

#[test]
fn variation_curve_length_and_shape() {
    let values: Vec<f64> = (0..100).map(|i| if i < 10 { 0.2 } else { 0.8 }).collect();
    let curve = relative_variation_curve(&values, 10);
    assert_eq!(curve.len(), 40);
    assert!(curve[0].abs() < 1e-12);
    assert!(curve.iter().all(|&r| r >= 0.0));
    // 截去越多瞬态样本，偏差越大，直到瞬态被截完
    assert!(curve[10] > curve[5]);

    let long: Vec<f64> = vec![1.0; 200];
    assert_eq!(relative_variation_curve(&long, 10).len(), 90);
    assert!(relative_variation_curve(&[], 10).is_empty());
}

#[test]
fn knee_point_is_farthest_from_chord() {
    let curve = [0.0, 0.5, 0.9, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
    assert_eq!(find_knee_point(&curve), 2);
    assert_eq!(find_knee_point(&[0.3, 0.1]), 0);
    assert_eq!(find_knee_point(&[0.0; 30]), 3);
}
