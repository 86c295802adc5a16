use crate::fleet::event::FleetEvent;
use crate::fleet::id::{CarId, RelocatorId, StationId};
use crate::fleet::world::FleetWorld;
use crate::sim::Simulator;
use tracing::{info, warn};

impl FleetWorld {
    /// 调度员送达：结束任务，开始充电，按所需电量安排充电完成
    pub(crate) fn on_arrive_at_station(
        &mut self,
        sim: &mut Simulator<FleetEvent>,
        car: CarId,
        station: StationId,
        relocator: RelocatorId,
    ) {
        let now = sim.now();
        if self.fleet.complete_relocation(relocator, car).is_none() {
            warn!(relocator = %relocator, car = %car, "调度员当前任务不是该车，忽略");
            return;
        }
        info!(relocator = %relocator, car = %car, station = %station, at = %now, "车辆已送达充电站");

        if let Err(err) = self.fleet.start_charging(car, station, now, &mut self.stats) {
            warn!(%err, "无法开始充电");
            return;
        }

        let hours = self
            .fleet
            .station(station)
            .charging_duration_hours(self.fleet.car(car));
        sim.schedule_in(60.0 * hours, FleetEvent::ChargingComplete { car, station });
    }

    /// 充电完成：充满并离开充电站
    pub(crate) fn on_charging_complete(&mut self, sim: &mut Simulator<FleetEvent>, car: CarId, station: StationId) {
        let now = sim.now();
        if !self.fleet.station(station).is_charging(car) {
            warn!(car = %car, station = %station, "车辆不在该充电站，忽略");
            return;
        }

        let c = self.fleet.car_mut(car);
        let missing = c.max_charge() - c.charge_level();
        c.charge(missing, now);
        self.fleet.stop_charging(car, station, now, &mut self.stats);
    }
}
