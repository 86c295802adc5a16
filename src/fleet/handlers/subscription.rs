use crate::fleet::event::FleetEvent;
use crate::fleet::world::FleetWorld;
use crate::sim::{MINUTES_PER_DAY, SimTime, Simulator};
use tracing::{debug, info};

impl FleetWorld {
    /// 新用户注册：安排其首次预约，并在人数未满时安排下一位用户到达
    pub(crate) fn on_user_subscription(&mut self, sim: &mut Simulator<FleetEvent>) {
        let now = sim.now();
        if self.fleet.users().len() >= self.cfg.max_users as usize {
            debug!(max_users = self.cfg.max_users, "用户数已达上限");
            return;
        }

        let user = self.fleet.add_user(now);
        info!(user = %user, at = %now, "👤 用户注册");

        let delay = self.exp_delay_minutes(self.cfg.user_reservation_rate);
        let location = self.random_location();
        sim.schedule_in(delay, FleetEvent::Reservation { user, location });

        if self.fleet.users().len() < self.cfg.max_users as usize {
            if let Some(at) = self.next_arrival(now) {
                sim.schedule(at, FleetEvent::UserSubscription);
            }
        }
    }

    /// 下一位用户的到达时刻。当前时段到达率为零时，跳到第一个到达率为正的时段再抽样；
    /// 一整天内都为零则不再有新用户。
    fn next_arrival(&mut self, now: SimTime) -> Option<SimTime> {
        let mut t = now;
        while t.minutes() < now.minutes() + MINUTES_PER_DAY {
            let rate = self.cfg.base_user_arrival_rate * self.road.traffic().demand_multiplier(t);
            if rate > 0.0 {
                return Some(t + self.exp_delay_minutes(rate));
            }
            t = self.road.traffic().next_period_boundary(t);
        }
        debug!("全天到达率为零，停止接收新用户");
        None
    }
}
