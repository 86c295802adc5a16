//! 路网拓扑
//!
//! 在地图上按规则网格布点（带随机抖动），连接水平/竖直相邻节点与少量对角捷径。
//! 边只保存欧氏距离；通行时间依赖时刻与交通模型，在查询时动态计算。

use super::id::NodeId;
use super::point::Point;
use super::traffic::{TrafficModel, ZoneFactors};
use crate::config::SimConfig;
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, info};

/// 路网节点（交叉口）
#[derive(Debug, Clone)]
pub struct RoadNode {
    pub id: NodeId,
    pub pos: Point,
    /// 构建时根据所在区域确定的静态交通属性
    pub zone: ZoneFactors,
}

/// 无向道路
#[derive(Debug, Clone)]
pub struct RoadEdge {
    pub a: NodeId,
    pub b: NodeId,
    pub distance: f64,
}

impl RoadEdge {
    pub fn other(&self, from: NodeId) -> NodeId {
        if self.a == from { self.b } else { self.a }
    }
}

/// 路网规模概要
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkSummary {
    pub nodes: usize,
    pub edges: usize,
}

/// 路网
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    pub(crate) nodes: Vec<RoadNode>,
    pub(crate) edges: Vec<RoadEdge>,
    /// adj[n] 为 (邻居, 边下标)
    pub(crate) adj: Vec<Vec<(NodeId, usize)>>,
    pub(crate) traffic: TrafficModel,
}

impl RoadNetwork {
    /// 空路网（测试或手工搭建拓扑时使用）
    pub fn new(traffic: TrafficModel) -> Self {
        Self {
            traffic,
            ..Self::default()
        }
    }

    /// 添加节点；节点的静态交通属性由所在区域决定
    pub fn add_node(&mut self, pos: Point) -> NodeId {
        let id = NodeId(self.nodes.len());
        let zone = self.traffic.zone_factors(pos);
        self.nodes.push(RoadNode { id, pos, zone });
        self.adj.push(Vec::new());
        id
    }

    /// 连接两个节点（无向），距离取两点的欧氏距离
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> usize {
        let distance = self.nodes[a.0].pos.distance(&self.nodes[b.0].pos);
        let idx = self.edges.len();
        self.edges.push(RoadEdge { a, b, distance });
        self.adj[a.0].push((b, idx));
        self.adj[b.0].push((a, idx));
        idx
    }

    /// 按配置生成网格路网
    #[tracing::instrument(skip_all, fields(width = cfg.map_width, height = cfg.map_height))]
    pub fn generate<R: Rng>(cfg: &SimConfig, rng: &mut R) -> Self {
        let mut net = RoadNetwork::new(TrafficModel::from_config(cfg));
        let grid = cfg.road_grid_size;
        let var = cfg.node_position_variance;
        let cols = (cfg.map_width / grid).floor() as usize + 1;
        let rows = (cfg.map_height / grid).floor() as usize + 1;

        let mut index: HashMap<(usize, usize), NodeId> = HashMap::with_capacity(cols * rows);
        for i in 0..cols {
            for j in 0..rows {
                let jitter = |rng: &mut R| if var > 0.0 { rng.gen_range(-var..=var) } else { 0.0 };
                let x = i as f64 * grid + jitter(rng);
                let y = j as f64 * grid + jitter(rng);
                let pos = Point::new(x, y).clamp_to(cfg.map_width, cfg.map_height);
                index.insert((i, j), net.add_node(pos));
            }
        }

        for i in 0..cols {
            for j in 0..rows {
                let cur = index[&(i, j)];
                if let Some(&right) = index.get(&(i + 1, j)) {
                    net.connect(cur, right);
                }
                if let Some(&down) = index.get(&(i, j + 1)) {
                    net.connect(cur, down);
                }
            }
        }

        for [from, to] in &cfg.diagonal_shortcuts {
            match (index.get(from), index.get(to)) {
                (Some(&a), Some(&b)) => {
                    net.connect(a, b);
                }
                _ => debug!(?from, ?to, "对角捷径超出网格，跳过"),
            }
        }

        let s = net.summary();
        info!(nodes = s.nodes, roads = s.edges, "🛣️  路网生成完成");
        net
    }

    pub fn summary(&self) -> NetworkSummary {
        NetworkSummary {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
        }
    }

    pub fn traffic(&self) -> &TrafficModel {
        &self.traffic
    }

    pub fn node(&self, id: NodeId) -> &RoadNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[RoadNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RoadEdge] {
        &self.edges
    }

    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adj[id.0].iter().map(|&(n, _)| n)
    }

    /// 距离 `p` 最近的节点；线性扫描，O(|V|)
    pub fn nearest_node(&self, p: Point) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for n in &self.nodes {
            let d = n.pos.distance(&p);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((n.id, d));
            }
        }
        best.map(|(id, _)| id)
    }
}
