use crate::fleet::event::FleetEvent;
use crate::fleet::world::FleetWorld;
use crate::sim::Simulator;

impl FleetWorld {
    /// 收集一个 bin 并安排下一次
    pub(crate) fn on_bin_collection(&mut self, sim: &mut Simulator<FleetEvent>) {
        let now = sim.now();
        let car_times = self.fleet.car_time_totals(now);
        self.stats.collect_bin(now.minutes(), car_times);
        sim.schedule_in(self.cfg.bin_interval, FleetEvent::BinCollection);
    }
}
