use crate::fleet::event::FleetEvent;
use crate::fleet::id::UserId;
use crate::fleet::world::FleetWorld;
use crate::road::Point;
use crate::sim::Simulator;
use rand::Rng;
use tracing::{info, warn};

impl FleetWorld {
    /// 预约：找最近的可用车；找不到则按次数重试或放弃，找到则预约并安排步行取车
    pub(crate) fn on_reservation(&mut self, sim: &mut Simulator<FleetEvent>, user: UserId, location: Point) {
        let now = sim.now();
        info!(user = %user, at = %now, location = %location, "用户发起预约");
        self.fleet.user_mut(user).begin_attempt(now);

        let mut candidate = self.fleet.nearest_available_car(location);
        if let Some(car) = candidate {
            let distance = self.road.route_distance(location, self.fleet.car(car).location);
            if distance > self.cfg.max_pickup_distance {
                warn!(
                    user = %user,
                    car = %car,
                    distance,
                    max = self.cfg.max_pickup_distance,
                    "最近的车辆太远"
                );
                candidate = None;
            }
        }

        let Some(car) = candidate else {
            let attempts = self.fleet.user_mut(user).fail_attempt();
            if attempts >= self.cfg.user_max_reservation_attempts {
                warn!(user = %user, attempts, at = %now, "没有可用车辆，达到最大尝试次数，放弃");
                self.stats.record_reservation_failure();
                self.fleet.user_mut(user).give_up();

                let delay = self.exp_delay_minutes(self.cfg.user_reservation_rate);
                let location = self.random_location();
                sim.schedule_in(delay, FleetEvent::Reservation { user, location });
            } else {
                warn!(user = %user, attempts, at = %now, "没有可用车辆，稍后重试");
                let delay = self.exp_delay_minutes(self.cfg.no_car_retry_rate);
                sim.schedule_in(delay, FleetEvent::Reservation { user, location });
            }
            return;
        };

        let (attempts, wait) = self.fleet.user_mut(user).succeed(now);
        self.stats.record_reservation_success(attempts);
        if let Some(wait) = wait {
            self.stats.record_wait_time(wait);
        }
        self.fleet.car_mut(car).reserve(now);

        let car_location = self.fleet.car(car).location;
        let walk_hours = self
            .road
            .route_time(location, car_location, self.cfg.walking_speed, now);
        let jitter = self.cfg.walking_time_jitter_hours;
        let jitter = if jitter > 0.0 { self.rng.gen_range(-jitter..=jitter) } else { 0.0 };
        let delay = (60.0 * (walk_hours + jitter)).max(0.0);

        info!(user = %user, car = %car, attempts, walk_minutes = delay, "✅ 预约成功");
        sim.schedule_in(
            delay,
            FleetEvent::Pickup {
                user,
                car,
                location: car_location,
            },
        );
    }
}
