use crate::config::{SimConfig, TimePeriodSpec, TrafficZoneSpec};
use crate::road::{NodeId, Point, RoadNetwork, TrafficModel};
use crate::sim::SimTime;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn square() -> RoadNetwork {
    let mut net = RoadNetwork::new(TrafficModel::default());
    let a = net.add_node(Point::new(0.0, 0.0));
    let b = net.add_node(Point::new(10.0, 0.0));
    let c = net.add_node(Point::new(10.0, 10.0));
    let d = net.add_node(Point::new(0.0, 10.0));
    net.connect(a, b);
    net.connect(b, c);
    net.connect(c, d);
    net.connect(d, a);
    net
}

fn zone(name: &str, bounds: [f64; 4], base: f64, rush: f64) -> TrafficZoneSpec {
    TrafficZoneSpec {
        name: name.to_string(),
        description: None,
        bounds,
        base_traffic_factor: base,
        rush_hour_multiplier: rush,
    }
}

fn period(name: &str, start: f64, end: f64, traffic: f64, rush: bool) -> TimePeriodSpec {
    TimePeriodSpec {
        name: name.to_string(),
        start_minute: start,
        end_minute: end,
        traffic_multiplier: traffic,
        demand_multiplier: 1.0,
        rush_hour: rush,
    }
}

/// S -> T 有上下两条等长路径；上路在高峰期严重拥堵，下路平时略慢。
fn two_route_network() -> (RoadNetwork, [NodeId; 4]) {
    let traffic = TrafficModel::new(
        vec![
            zone("upper", [8.0, 8.0, 12.0, 12.0], 1.0, 10.0),
            zone("lower", [8.0, -2.0, 12.0, 2.0], 2.0, 1.0),
        ],
        vec![
            period("OFF_PEAK", 0.0, 60.0, 1.0, false),
            period("RUSH", 60.0, 120.0, 1.0, true),
        ],
    );
    let mut net = RoadNetwork::new(traffic);
    let s = net.add_node(Point::new(0.0, 5.0));
    let u = net.add_node(Point::new(10.0, 10.0));
    let l = net.add_node(Point::new(10.0, 0.0));
    let t = net.add_node(Point::new(20.0, 5.0));
    net.connect(s, u);
    net.connect(u, t);
    net.connect(s, l);
    net.connect(l, t);
    (net, [s, u, l, t])
}

#[test]
fn route_distance_follows_roads() {
    let net = square();
    let d = net.route_distance(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    assert!(approx(d, 20.0), "got {d}");
}

#[test]
fn route_distance_to_self_is_zero() {
    let net = square();
    let p = Point::new(3.0, 4.0);
    assert_eq!(net.route_distance(p, p), 0.0);
    assert_eq!(net.route_time(p, p, 30.0, SimTime::ZERO), 0.0);
}

#[test]
fn same_nearest_node_falls_back_to_straight_line() {
    let net = square();
    let a = Point::new(1.0, 1.0);
    let b = Point::new(2.0, 3.0);
    assert_eq!(net.nearest_node(a), net.nearest_node(b));
    assert!(approx(net.route_distance(a, b), a.distance(&b)));
    assert!(approx(net.route_time(a, b, 10.0, SimTime::ZERO), a.distance(&b) / 10.0));
}

#[test]
fn unreachable_nodes_fall_back_to_straight_line() {
    let mut net = RoadNetwork::new(TrafficModel::default());
    net.add_node(Point::new(0.0, 0.0));
    net.add_node(Point::new(50.0, 0.0));
    let a = Point::new(0.0, 0.0);
    let b = Point::new(50.0, 0.0);
    assert!(approx(net.route_distance(a, b), 50.0));
    assert!(approx(net.route_time(a, b, 25.0, SimTime::ZERO), 2.0));
}

#[test]
fn empty_network_falls_back_to_straight_line() {
    let net = RoadNetwork::default();
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert!(net.nearest_node(a).is_none());
    assert!(approx(net.route_distance(a, b), 5.0));
}

#[test]
fn nearest_node_picks_closest() {
    let net = square();
    assert_eq!(net.nearest_node(Point::new(9.0, 8.0)), Some(NodeId(2)));
    assert_eq!(net.nearest_node(Point::new(-5.0, -5.0)), Some(NodeId(0)));
}

#[test]
fn fastest_route_depends_on_time_of_day() {
    let (net, [s, u, l, t]) = two_route_network();
    let seg = Point::new(0.0, 5.0).distance(&Point::new(10.0, 10.0));

    let off_peak = SimTime(30.0);
    let path = net
        .shortest_path(s, t, |e| net.edge_travel_time(e, 10.0, off_peak))
        .expect("path");
    assert_eq!(path.nodes, vec![s, u, t]);
    let hours = net.route_time(Point::new(0.0, 5.0), Point::new(20.0, 5.0), 10.0, off_peak);
    assert!(approx(hours, 2.0 * seg / 10.0), "got {hours}");

    let rush = SimTime(90.0);
    let path = net
        .shortest_path(s, t, |e| net.edge_travel_time(e, 10.0, rush))
        .expect("path");
    assert_eq!(path.nodes, vec![s, l, t]);
    let hours = net.route_time(Point::new(0.0, 5.0), Point::new(20.0, 5.0), 10.0, rush);
    assert!(approx(hours, 2.0 * seg * 1.5 / 10.0), "got {hours}");

    // 距离最短路不受时段影响
    let d = net.route_distance(Point::new(0.0, 5.0), Point::new(20.0, 5.0));
    assert!(approx(d, 2.0 * seg));
}

#[test]
fn zero_traffic_multiplier_gives_zero_travel_time() {
    let traffic = TrafficModel::new(Vec::new(), vec![period("FREE", 0.0, 1440.0, 0.0, false)]);
    let mut net = RoadNetwork::new(traffic);
    let a = net.add_node(Point::new(0.0, 0.0));
    let b = net.add_node(Point::new(10.0, 0.0));
    net.connect(a, b);

    let t = net.route_time(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 30.0, SimTime(100.0));
    assert_eq!(t, 0.0);
}

#[test]
fn route_time_is_non_negative() {
    let (net, _) = two_route_network();
    for m in [0.0, 59.0, 61.0, 500.0, 1439.0] {
        let t = net.route_time(Point::new(1.0, 4.0), Point::new(19.0, 6.0), 20.0, SimTime(m));
        assert!(t >= 0.0 && t.is_finite());
    }
}

#[test]
fn generated_grid_has_expected_shape_and_zones() {
    let cfg = SimConfig {
        node_position_variance: 0.0,
        ..SimConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(7);
    let net = RoadNetwork::generate(&cfg, &mut rng);

    let s = net.summary();
    assert_eq!(s.nodes, 49);
    assert_eq!(s.edges, 42 + 42 + 9);

    // (i, j) = (2, 2) 位于 (30, 30)，落在 center 区域（第一个匹配）
    let center = net.node(NodeId(2 * 7 + 2));
    assert_eq!(center.pos, Point::new(30.0, 30.0));
    assert_eq!(center.zone.base, 2.5);
    assert_eq!(center.zone.rush_hour, 1.5);

    // (0, 0) 只在 industrial 区域内
    assert_eq!(net.node(NodeId(0)).zone.base, 0.5);
}

#[test]
fn generated_grid_stays_within_map_bounds() {
    let cfg = SimConfig {
        node_position_variance: 5.0,
        ..SimConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(11);
    let net = RoadNetwork::generate(&cfg, &mut rng);
    for n in net.nodes() {
        assert!((0.0..=cfg.map_width).contains(&n.pos.x));
        assert!((0.0..=cfg.map_height).contains(&n.pos.y));
    }
    for e in net.edges() {
        let d = net.node(e.a).pos.distance(&net.node(e.b).pos);
        assert!(approx(e.distance, d));
    }
}

#[test]
fn out_of_grid_shortcuts_are_skipped() {
    let cfg = SimConfig {
        map_width: 30.0,
        map_height: 30.0,
        node_position_variance: 0.0,
        diagonal_shortcuts: vec![[(0, 0), (1, 1)], [(2, 2), (3, 3)]],
        ..SimConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(1);
    let net = RoadNetwork::generate(&cfg, &mut rng);
    // 3x3 网格：12 条横竖边 + 1 条有效捷径
    assert_eq!(net.summary().edges, 13);
}
