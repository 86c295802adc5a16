//! 分箱快照
//!
//! 每隔固定时间对累计计数取一次快照，与上一次快照相减得到该时间窗（bin）内的增量。

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// 车辆在三类状态中累计的时间（分钟）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeBuckets {
    pub idle: f64,
    pub in_use: f64,
    pub charging: f64,
}

impl TimeBuckets {
    pub fn total(&self) -> f64 {
        self.idle + self.in_use + self.charging
    }
}

impl Add for TimeBuckets {
    type Output = TimeBuckets;

    fn add(self, rhs: TimeBuckets) -> TimeBuckets {
        TimeBuckets {
            idle: self.idle + rhs.idle,
            in_use: self.in_use + rhs.in_use,
            charging: self.charging + rhs.charging,
        }
    }
}

impl AddAssign for TimeBuckets {
    fn add_assign(&mut self, rhs: TimeBuckets) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for TimeBuckets {
    fn sum<I: Iterator<Item = TimeBuckets>>(iter: I) -> Self {
        iter.fold(TimeBuckets::default(), Add::add)
    }
}

/// 某一时刻全部累计量的快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub successful_reservations: u64,
    pub failed_reservations: u64,
    pub total_wait_time: f64,
    pub waiting_users: u64,
    pub total_walking_time: f64,
    pub walking_users: u64,
    pub trips: u64,
    pub trip_distance: f64,
    pub attempts: u64,
    pub charging_sessions: u64,
    pub car_times: TimeBuckets,
}

/// 一个时间窗内的增量；只追加、不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// 快照时刻（分钟）
    pub time: f64,
    pub successful_reservations: u64,
    pub failed_reservations: u64,
    pub trips: u64,
    pub trip_distance: f64,
    pub attempts: u64,
    pub in_use_time: f64,
    pub charging_time: f64,
    pub car_time: f64,
    pub wait_time: f64,
    pub walking_time: f64,
    pub charging_sessions: u64,
}

impl Bin {
    /// 由相邻两次快照求增量；`prev` 为空时增量即当前值
    pub fn delta(time: f64, cur: &Snapshot, prev: Option<&Snapshot>) -> Bin {
        let zero = Snapshot::default();
        let prev = prev.unwrap_or(&zero);
        Bin {
            time,
            successful_reservations: cur.successful_reservations - prev.successful_reservations,
            failed_reservations: cur.failed_reservations - prev.failed_reservations,
            trips: cur.trips - prev.trips,
            trip_distance: cur.trip_distance - prev.trip_distance,
            attempts: cur.attempts - prev.attempts,
            in_use_time: cur.car_times.in_use - prev.car_times.in_use,
            charging_time: cur.car_times.charging - prev.car_times.charging,
            car_time: cur.car_times.total() - prev.car_times.total(),
            wait_time: cur.total_wait_time - prev.total_wait_time,
            walking_time: cur.total_walking_time - prev.total_walking_time,
            charging_sessions: cur.charging_sessions - prev.charging_sessions,
        }
    }

    pub fn reservations(&self) -> u64 {
        self.successful_reservations + self.failed_reservations
    }

    /// 该时间窗内是否有预约活动（成功或失败）
    pub fn is_active(&self) -> bool {
        self.reservations() > 0
    }

    pub fn success_rate(&self) -> f64 {
        ratio(self.successful_reservations as f64, self.reservations() as f64)
    }

    pub fn avg_attempts(&self) -> f64 {
        ratio(self.attempts as f64, self.successful_reservations as f64)
    }

    pub fn avg_trip_distance(&self) -> f64 {
        ratio(self.trip_distance, self.trips as f64)
    }

    pub fn utilization_rate(&self) -> f64 {
        ratio(self.in_use_time, self.car_time)
    }

    pub fn metric(&self, m: BinMetric) -> f64 {
        match m {
            BinMetric::SuccessRate => self.success_rate(),
            BinMetric::AvgAttempts => self.avg_attempts(),
            BinMetric::AvgTripDistance => self.avg_trip_distance(),
            BinMetric::UtilizationRate => self.utilization_rate(),
        }
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}

/// 可做瞬态检测/置信区间分析的逐 bin 指标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinMetric {
    SuccessRate,
    AvgAttempts,
    AvgTripDistance,
    UtilizationRate,
}

impl BinMetric {
    pub const ALL: [BinMetric; 4] = [
        BinMetric::SuccessRate,
        BinMetric::AvgAttempts,
        BinMetric::UtilizationRate,
        BinMetric::AvgTripDistance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BinMetric::SuccessRate => "Reservation Success Rate",
            BinMetric::AvgAttempts => "Average Attempts Before Success",
            BinMetric::AvgTripDistance => "Average Trip Distance",
            BinMetric::UtilizationRate => "Car Utilization Rate",
        }
    }
}

/// 指定指标在一组 bin 上的取值
pub fn metric_series<'a, I>(bins: I, metric: BinMetric) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Bin>,
{
    bins.into_iter().map(|b| b.metric(metric)).collect()
}
