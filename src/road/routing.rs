//! 最短路径路由
//!
//! 两类查询共用同一个 Dijkstra：
//! - `route_distance`：边权为道路长度，得到“最短”路径；
//! - `route_time`：边权为按当前时刻交通状况动态计算的通行时间，得到“最快”路径，
//!   同一对端点在不同时刻可能走不同的路。
//!
//! 端点先映射到最近的路网节点；若两端映射到同一节点或不可达，退化为直线估计。

use super::id::NodeId;
use super::network::{RoadEdge, RoadNetwork};
use super::point::Point;
use crate::sim::SimTime;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

/// 一条路径：经过的节点序列与总代价
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    node: NodeId,
}

// 反向比较，使 BinaryHeap 变成按代价的 min-heap。
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl RoadNetwork {
    /// 单源 Dijkstra，`weight` 给出每条边的非负代价
    pub fn shortest_path<F>(&self, src: NodeId, dst: NodeId, weight: F) -> Option<Path>
    where
        F: Fn(&RoadEdge) -> f64,
    {
        let n = self.nodes.len();
        if src.0 >= n || dst.0 >= n {
            return None;
        }

        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<NodeId>> = vec![None; n];
        let mut heap = BinaryHeap::new();

        dist[src.0] = 0.0;
        heap.push(Frontier { cost: 0.0, node: src });

        while let Some(Frontier { cost, node }) = heap.pop() {
            if node == dst {
                break;
            }
            if cost > dist[node.0] {
                continue; // stale
            }
            for &(next, edge_idx) in &self.adj[node.0] {
                let w = weight(&self.edges[edge_idx]).max(0.0);
                let cand = cost + w;
                if cand < dist[next.0] {
                    dist[next.0] = cand;
                    prev[next.0] = Some(node);
                    heap.push(Frontier { cost: cand, node: next });
                }
            }
        }

        if !dist[dst.0].is_finite() {
            return None;
        }

        let mut nodes = vec![dst];
        let mut cur = dst;
        while let Some(p) = prev[cur.0] {
            nodes.push(p);
            cur = p;
        }
        nodes.reverse();
        Some(Path {
            nodes,
            cost: dist[dst.0],
        })
    }

    /// 边在时刻 `t` 的平均交通因子：两端节点因子的均值
    pub fn edge_traffic_factor(&self, edge: &RoadEdge, t: SimTime) -> f64 {
        let mult = self.traffic.time_multiplier(t);
        let rush = self.traffic.is_rush_hour(t);
        let fa = self.nodes[edge.a.0].zone.at(mult, rush);
        let fb = self.nodes[edge.b.0].zone.at(mult, rush);
        (fa + fb) / 2.0
    }

    /// 边在时刻 `t` 以基础速度 `speed` 行驶所需的时间（小时）。
    ///
    /// 有效速度为 `speed / factor`，即时间为 `distance * factor / speed`。
    pub fn edge_travel_time(&self, edge: &RoadEdge, speed: f64, t: SimTime) -> f64 {
        edge.distance * self.edge_traffic_factor(edge, t) / speed
    }

    fn endpoints(&self, a: Point, b: Point) -> Option<(NodeId, NodeId)> {
        let na = self.nearest_node(a)?;
        let nb = self.nearest_node(b)?;
        if na == nb { None } else { Some((na, nb)) }
    }

    /// 沿道路的最短距离；退化时返回欧氏距离
    pub fn route_distance(&self, a: Point, b: Point) -> f64 {
        let Some((na, nb)) = self.endpoints(a, b) else {
            return a.distance(&b);
        };
        match self.shortest_path(na, nb, |e| e.distance) {
            Some(path) => path.cost,
            None => {
                trace!(from = %a, to = %b, "路网不可达，使用直线距离");
                a.distance(&b)
            }
        }
    }

    /// 在时刻 `t` 以基础速度 `speed` 从 `a` 到 `b` 的最快通行时间（小时）；
    /// 退化时返回直线距离 / 速度
    pub fn route_time(&self, a: Point, b: Point, speed: f64, t: SimTime) -> f64 {
        let fallback = || {
            if speed > 0.0 {
                a.distance(&b) / speed
            } else {
                f64::INFINITY
            }
        };
        if speed <= 0.0 {
            return fallback();
        }
        let Some((na, nb)) = self.endpoints(a, b) else {
            return fallback();
        };
        match self.shortest_path(na, nb, |e| self.edge_travel_time(e, speed, t)) {
            Some(path) => path.cost,
            None => {
                trace!(from = %a, to = %b, "路网不可达，使用直线时间");
                fallback()
            }
        }
    }
}
