use crate::fleet::event::FleetEvent;
use crate::fleet::id::CarId;
use crate::fleet::world::FleetWorld;
use crate::sim::Simulator;
use tracing::{error, info, warn};

impl FleetWorld {
    /// 为需要充电的车安排调度员，把它送到最近的充电站
    pub(crate) fn on_relocate_car(&mut self, sim: &mut Simulator<FleetEvent>, car: CarId) {
        let now = sim.now();
        let c = self.fleet.car(car);
        if !c.needs_charging()
            || self.fleet.charging_station_of(car).is_some()
            || self.fleet.relocator_carrying(car).is_some()
        {
            warn!(car = %car, status = %c.status(), "车辆无需调度，忽略过期的调度事件");
            return;
        }
        let car_location = c.location;

        let Some(relocator) = self.fleet.available_relocator() else {
            warn!(car = %car, retry_in = self.cfg.relocation_retry_delay, "没有空闲调度员，稍后重试");
            sim.schedule_in(self.cfg.relocation_retry_delay, FleetEvent::RelocateCar { car });
            return;
        };

        let Some(station) = self.fleet.nearest_station(car_location) else {
            error!(car = %car, at = %now, "没有可用的充电站");
            return;
        };
        let destination = self.fleet.station(station).location;

        if let Err(err) = self.fleet.assign_relocation(relocator, car, destination) {
            error!(car = %car, %err, "分配调度员失败");
            return;
        }
        info!(relocator = %relocator, car = %car, station = %station, at = %now, "🚚 调度员出发");

        let hours = self
            .fleet
            .relocator(relocator)
            .travel_time_hours(&self.road, car_location, destination, now);
        sim.schedule_in(
            60.0 * hours,
            FleetEvent::ArriveAtStation {
                car,
                station,
                relocator,
            },
        );
    }
}
