//! 用户
//!
//! 用户只保存一次“预约周期”中的计数与时间戳：尝试次数、首次尝试时间、预约成功时间。

use super::id::UserId;
use crate::sim::SimTime;

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub subscribed_at: SimTime,
    reservation_attempts: u32,
    first_reservation_time: Option<SimTime>,
    reservation_success_time: Option<SimTime>,
}

impl User {
    pub fn new(id: UserId, now: SimTime) -> Self {
        Self {
            id,
            subscribed_at: now,
            reservation_attempts: 0,
            first_reservation_time: None,
            reservation_success_time: None,
        }
    }

    pub fn reservation_attempts(&self) -> u32 {
        self.reservation_attempts
    }

    pub fn first_reservation_time(&self) -> Option<SimTime> {
        self.first_reservation_time
    }

    pub fn reservation_success_time(&self) -> Option<SimTime> {
        self.reservation_success_time
    }

    /// 开始一次尝试：周期内首次尝试时记录时间
    pub fn begin_attempt(&mut self, now: SimTime) {
        self.first_reservation_time.get_or_insert(now);
    }

    /// 一次失败的尝试，返回累计失败次数
    pub fn fail_attempt(&mut self) -> u32 {
        self.reservation_attempts += 1;
        self.reservation_attempts
    }

    /// 放弃本周期
    pub fn give_up(&mut self) {
        self.reservation_attempts = 0;
        self.first_reservation_time = None;
    }

    /// 预约成功：返回（含本次在内的尝试次数, 等待分钟数）并开始等待取车
    pub fn succeed(&mut self, now: SimTime) -> (u32, Option<f64>) {
        let attempts = self.reservation_attempts + 1;
        let wait = self
            .first_reservation_time
            .take()
            .map(|t| now - t)
            .filter(|w| *w >= 0.0);
        self.reservation_attempts = 0;
        self.reservation_success_time = Some(now);
        (attempts, wait)
    }

    /// 取车：返回步行分钟数并清空周期内的时间戳
    pub fn pick_up(&mut self, now: SimTime) -> Option<f64> {
        self.first_reservation_time = None;
        self.reservation_success_time
            .take()
            .map(|t| now - t)
            .filter(|w| *w >= 0.0)
    }
}
