use crate::fleet::car::{CarStatus, sample_consumption_rate};
use crate::fleet::event::FleetEvent;
use crate::fleet::id::{CarId, UserId};
use crate::fleet::world::FleetWorld;
use crate::road::Point;
use crate::sim::Simulator;
use tracing::{info, warn};

impl FleetWorld {
    /// 取车：记录步行时间，随机生成目的地并安排还车。
    ///
    /// `location` 是车辆所在位置（用户已步行到车旁），行程从这里出发，
    /// 而不是从用户发起预约的位置出发。
    pub(crate) fn on_pickup(&mut self, sim: &mut Simulator<FleetEvent>, user: UserId, car: CarId, location: Point) {
        let now = sim.now();
        let status = self.fleet.car(car).status();
        if status != CarStatus::Reserved {
            warn!(user = %user, car = %car, status = %status, "取车时车辆不是预约状态，忽略");
            return;
        }

        if let Some(walk) = self.fleet.user_mut(user).pick_up(now) {
            self.stats.record_walking_time(walk);
        }

        let destination = self.random_location();
        let trip_hours = self
            .road
            .route_time(location, destination, self.cfg.driving_speed, now);
        self.fleet.car_mut(car).start_use(now);

        info!(user = %user, car = %car, at = %now, from = %location, to = %destination, "🚙 取车出发");
        sim.schedule_in(
            60.0 * trip_hours,
            FleetEvent::Dropoff {
                user,
                car,
                start: location,
                end: destination,
            },
        );
    }

    /// 还车：记录行程、扣减电量；电量不足时立刻安排调度。随后安排用户的下一轮预约
    pub(crate) fn on_dropoff(
        &mut self,
        sim: &mut Simulator<FleetEvent>,
        user: UserId,
        car: CarId,
        start: Point,
        end: Point,
    ) {
        let now = sim.now();
        let status = self.fleet.car(car).status();
        if status != CarStatus::InUse {
            warn!(user = %user, car = %car, status = %status, "还车时车辆不在使用中，忽略");
            return;
        }

        let distance = self.road.route_distance(start, end);
        self.stats.record_trip(distance);
        info!(user = %user, car = %car, at = %now, location = %end, distance, "还车");

        let rate = sample_consumption_rate(
            self.cfg.car_consumption_base,
            self.cfg.car_consumption_variance,
            &mut self.rng,
        );
        let c = self.fleet.car_mut(car);
        c.update_location(end);
        c.free_up(now);
        c.update_charge(distance, rate, now);

        if c.charge_level() <= c.charging_threshold() {
            warn!(car = %car, charge = c.charge_level(), status = %c.status(), "车辆需要送去充电");
            sim.schedule(now, FleetEvent::RelocateCar { car });
        }

        let delay = self.exp_delay_minutes(self.cfg.user_reservation_rate);
        let location = self.random_location();
        sim.schedule_in(delay, FleetEvent::Reservation { user, location });
    }
}
