//! 统计引擎
//!
//! 维护整个运行期间的累计计数，并按固定间隔生成 bin。引擎由仿真世界独占，
//! 事件处理器通过 `record_*` 写入样本。

use super::bin::{Bin, Snapshot, TimeBuckets};
use tracing::{debug, trace};

/// 累计计数与 bin 序列
#[derive(Debug, Default)]
pub struct StatsEngine {
    successful_reservations: u64,
    failed_reservations: u64,
    total_wait_time: f64,
    waiting_users: u64,
    total_walking_time: f64,
    walking_users: u64,
    total_trips: u64,
    total_trip_distance: f64,
    total_attempts: u64,
    charging_sessions: u64,
    queue_length_sum: u64,
    queue_samples: u64,

    bins: Vec<Bin>,
    last_snapshot: Option<Snapshot>,
    last_bin_time: Option<f64>,
}

impl StatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 一次成功预约，`attempts` 包含成功的那一次
    pub fn record_reservation_success(&mut self, attempts: u32) {
        self.successful_reservations += 1;
        self.total_attempts += u64::from(attempts);
    }

    pub fn record_reservation_failure(&mut self) {
        self.failed_reservations += 1;
    }

    /// 从首次尝试到预约成功的等待时间（分钟）
    pub fn record_wait_time(&mut self, minutes: f64) {
        self.total_wait_time += minutes;
        self.waiting_users += 1;
    }

    /// 从预约成功到取车的步行时间（分钟）
    pub fn record_walking_time(&mut self, minutes: f64) {
        self.total_walking_time += minutes;
        self.walking_users += 1;
    }

    pub fn record_trip(&mut self, distance: f64) {
        self.total_trips += 1;
        self.total_trip_distance += distance;
    }

    pub fn record_charging_session(&mut self) {
        self.charging_sessions += 1;
    }

    /// 充电站排队长度采样
    pub fn record_queue_length(&mut self, len: usize) {
        self.queue_length_sum += len as u64;
        self.queue_samples += 1;
    }

    /// 是否已经发生过预约活动（成功或失败）
    pub fn has_activity(&self) -> bool {
        self.successful_reservations + self.failed_reservations > 0
    }

    /// 当前累计量的快照；`car_times` 为全部车辆的时间桶之和
    pub fn snapshot(&self, car_times: TimeBuckets) -> Snapshot {
        Snapshot {
            successful_reservations: self.successful_reservations,
            failed_reservations: self.failed_reservations,
            total_wait_time: self.total_wait_time,
            waiting_users: self.waiting_users,
            total_walking_time: self.total_walking_time,
            walking_users: self.walking_users,
            trips: self.total_trips,
            trip_distance: self.total_trip_distance,
            attempts: self.total_attempts,
            charging_sessions: self.charging_sessions,
            car_times,
        }
    }

    /// 周期性收集一个 bin；尚无预约活动时跳过，返回是否生成了 bin
    pub fn collect_bin(&mut self, time: f64, car_times: TimeBuckets) -> bool {
        if !self.has_activity() {
            trace!(time, "尚无预约活动，跳过 bin");
            return false;
        }
        let cur = self.snapshot(car_times);
        let bin = Bin::delta(time, &cur, self.last_snapshot.as_ref());
        debug!(
            index = self.bins.len(),
            time,
            trips = bin.trips,
            success_rate = bin.success_rate(),
            "收集 bin"
        );
        self.bins.push(bin);
        self.last_snapshot = Some(cur);
        self.last_bin_time = Some(time);
        true
    }

    /// 运行结束时补齐最后一个（可能不完整的）bin
    pub fn flush(&mut self, time: f64, car_times: TimeBuckets) -> bool {
        if self.last_bin_time.is_some_and(|t| t >= time) {
            return false;
        }
        self.collect_bin(time, car_times)
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn successful_reservations(&self) -> u64 {
        self.successful_reservations
    }

    pub fn failed_reservations(&self) -> u64 {
        self.failed_reservations
    }

    pub fn total_reservations(&self) -> u64 {
        self.successful_reservations + self.failed_reservations
    }

    pub fn total_trips(&self) -> u64 {
        self.total_trips
    }

    pub fn total_trip_distance(&self) -> f64 {
        self.total_trip_distance
    }

    pub fn total_attempts(&self) -> u64 {
        self.total_attempts
    }

    pub fn charging_sessions(&self) -> u64 {
        self.charging_sessions
    }

    pub fn walking_samples(&self) -> u64 {
        self.walking_users
    }

    pub fn reservation_success_rate(&self) -> f64 {
        ratio(self.successful_reservations as f64, self.total_reservations() as f64)
    }

    pub fn average_wait_time(&self) -> f64 {
        ratio(self.total_wait_time, self.waiting_users as f64)
    }

    pub fn average_walking_time(&self) -> f64 {
        ratio(self.total_walking_time, self.walking_users as f64)
    }

    pub fn average_trip_distance(&self) -> f64 {
        ratio(self.total_trip_distance, self.total_trips as f64)
    }

    pub fn average_attempts_before_success(&self) -> f64 {
        ratio(self.total_attempts as f64, self.successful_reservations as f64)
    }

    pub fn average_queue_length(&self) -> f64 {
        ratio(self.queue_length_sum as f64, self.queue_samples as f64)
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}
