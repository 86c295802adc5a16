use crate::config::{SimConfig, SystemType};
use crate::error::SimError;
use crate::runner::{Simulation, run};
use crate::sim::SimTime;

fn short_config(seed: u64) -> SimConfig {
    SimConfig {
        seed,
        simulation_end_time: 3.0 * 1440.0,
        max_users: 40,
        base_user_arrival_rate: 2.0,
        user_reservation_rate: 1.0,
        num_cars: 8,
        ..SimConfig::default()
    }
}

#[test]
fn same_seed_gives_identical_summary() {
    let a = run(&short_config(9)).expect("run a");
    let b = run(&short_config(9)).expect("run b");
    assert_eq!(a, b);
}

#[test]
fn summary_is_internally_consistent() {
    let m = run(&short_config(5)).expect("run");
    assert_eq!(m.total_reservations, m.successful_reservations + m.failed_reservations);
    assert!(m.total_reservations > 0);
    assert!(m.total_trips <= m.successful_reservations);
    assert!((0.0..=1.0).contains(&m.reservation_success_rate));
    assert!((m.in_use_rate + m.charging_rate + m.idle_rate - 1.0).abs() < 1e-9);
    assert!(m.average_attempts_before_success >= 1.0 || m.successful_reservations == 0);
    assert_eq!(m.simulated_minutes, 3.0 * 1440.0);
    assert!(m.bins_collected > 0);
}

#[test]
fn invalid_config_is_an_error() {
    let cfg = SimConfig {
        simulation_end_time: -1.0,
        ..SimConfig::default()
    };
    assert!(matches!(run(&cfg), Err(SimError::InvalidConfig(_))));
}

#[test]
fn bins_sum_to_final_totals() {
    let mut sim = Simulation::new(short_config(3)).expect("build");
    let summary = sim.run_to_end();
    let stats = &sim.world().stats;
    let bins = stats.bins();
    assert_eq!(bins.len(), summary.bins_collected);
    assert_eq!(
        bins.iter().map(|b| b.successful_reservations).sum::<u64>(),
        summary.successful_reservations
    );
    assert_eq!(bins.iter().map(|b| b.trips).sum::<u64>(), summary.total_trips);
    let car_time: f64 = bins.iter().map(|b| b.car_time).sum();
    let total = sim.world().fleet.car_time_totals(sim.now()).total();
    assert!((car_time - total).abs() < 1e-6 * total.max(1.0));
}

#[test]
fn car_time_accounting_matches_elapsed_time() {
    let mut sim = Simulation::new(short_config(11)).expect("build");
    sim.run_until(SimTime(2000.0));
    let now = sim.now();
    for car in sim.world().fleet.cars() {
        let t = car.time_buckets(now);
        assert!((t.total() - now.since(car.created_at())).abs() < 1e-6);
        assert!((0.0..=car.max_charge()).contains(&car.charge_level()));
    }
}

#[test]
fn cycle_stationary_report_after_run() {
    let cfg = SimConfig {
        system_type: SystemType::CycleStationary,
        ..short_config(2)
    };
    let mut sim = Simulation::new(cfg).expect("build");
    sim.run_to_end();
    let report = sim.report();
    assert_eq!(report.system_type, SystemType::CycleStationary);
    if report.warning.is_none() {
        assert_eq!(report.cycle_intervals.len(), 3);
    }
}
