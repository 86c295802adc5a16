use crate::sim::{SimTime, Simulator, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ev {
    Push(u32),
    PushThenScheduleNow { id: u32, next_id: u32 },
}

#[derive(Default)]
struct LogWorld {
    log: Vec<u32>,
    ticks: usize,
}

impl World<Ev> for LogWorld {
    fn handle(&mut self, ev: Ev, sim: &mut Simulator<Ev>) {
        match ev {
            Ev::Push(id) => self.log.push(id),
            Ev::PushThenScheduleNow { id, next_id } => {
                self.log.push(id);
                sim.schedule(sim.now(), Ev::Push(next_id));
            }
        }
    }

    fn on_tick(&mut self, _sim: &mut Simulator<Ev>) {
        self.ticks = self.ticks.saturating_add(1);
    }
}

#[test]
fn scheduled_events_order_by_time_then_seq() {
    let mut sim = Simulator::default();
    sim.schedule(SimTime(10.0), Ev::Push(1));
    sim.schedule(SimTime(5.0), Ev::Push(2));
    sim.schedule(SimTime(10.0), Ev::Push(3));

    let mut world = LogWorld::default();
    sim.run(&mut world);

    assert_eq!(world.log, vec![2, 1, 3]);
    assert_eq!(world.ticks, 3);
    assert_eq!(sim.now(), SimTime(10.0));
    assert_eq!(sim.executed(), 3);
}

#[test]
fn events_at_identical_time_run_in_scheduling_order() {
    let mut sim = Simulator::default();
    for id in 0..50 {
        sim.schedule(SimTime(42.5), Ev::Push(id));
    }

    let mut world = LogWorld::default();
    sim.run(&mut world);

    assert_eq!(world.log, (0..50).collect::<Vec<_>>());
}

#[test]
fn event_scheduled_at_same_time_inside_event_runs_after_current_event() {
    let mut sim = Simulator::default();
    sim.schedule(SimTime::ZERO, Ev::PushThenScheduleNow { id: 1, next_id: 2 });
    sim.schedule(SimTime::ZERO, Ev::Push(3));

    let mut world = LogWorld::default();
    sim.run(&mut world);

    assert_eq!(world.log, vec![1, 3, 2]);
    assert_eq!(world.ticks, 3);
    assert_eq!(sim.now(), SimTime::ZERO);
}

#[test]
fn run_until_skips_events_after_until_and_advances_time() {
    let mut sim = Simulator::default();
    sim.schedule(SimTime::ZERO, Ev::Push(1));
    sim.schedule(SimTime(10.0), Ev::Push(2));

    let mut world = LogWorld::default();
    sim.run_until(SimTime(5.0), &mut world);

    assert_eq!(world.log, vec![1]);
    assert_eq!(world.ticks, 1);
    assert_eq!(sim.now(), SimTime(5.0));
    assert_eq!(sim.pending(), 1);

    sim.run(&mut world);
    assert_eq!(world.log, vec![1, 2]);
    assert_eq!(world.ticks, 2);
    assert_eq!(sim.now(), SimTime(10.0));
}

#[test]
fn run_until_executes_events_scheduled_exactly_at_until() {
    let mut sim = Simulator::default();
    sim.schedule(SimTime(5.0), Ev::Push(1));

    let mut world = LogWorld::default();
    sim.run_until(SimTime(5.0), &mut world);

    assert_eq!(world.log, vec![1]);
    assert_eq!(world.ticks, 1);
    assert_eq!(sim.now(), SimTime(5.0));
}

#[test]
fn run_until_advances_time_even_if_there_are_no_events() {
    let mut sim: Simulator<Ev> = Simulator::default();
    let mut world = LogWorld::default();

    sim.run_until(SimTime(7.0), &mut world);
    assert_eq!(sim.now(), SimTime(7.0));
    assert_eq!(world.ticks, 0);
}

#[test]
fn pop_next_returns_none_when_empty_and_advances_now() {
    let mut sim = Simulator::default();
    assert!(sim.pop_next().is_none());

    sim.schedule(SimTime(3.0), Ev::Push(9));
    sim.schedule_in(1.0, Ev::Push(8));
    assert_eq!(sim.next_event_time(), Some(SimTime(1.0)));

    let first = sim.pop_next().expect("event");
    assert_eq!(first.at(), SimTime(1.0));
    assert_eq!(*first.event(), Ev::Push(8));
    assert_eq!(sim.now(), SimTime(1.0));

    let second = sim.pop_next().expect("event");
    assert_eq!(second.into_event(), Ev::Push(9));
    assert!(sim.is_empty());
}

#[test]
fn schedule_accepts_times_in_the_past() {
    let mut sim = Simulator::default();
    let mut world = LogWorld::default();
    sim.run_until(SimTime(10.0), &mut world);

    sim.schedule(SimTime(2.0), Ev::Push(1));
    assert_eq!(sim.pending(), 1);
    sim.run(&mut world);
    assert_eq!(world.log, vec![1]);
}
