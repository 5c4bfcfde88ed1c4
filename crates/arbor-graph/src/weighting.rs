//! Node prizes and edge costs.
//!
//! ```text
//! cost(u, v) = distance(topics_u, topics_v)                         (plain)
//! cost(u, v) = max(0, distance - alpha * tau^(dt_secs * time_scale)) (recency)
//! ```

use arbor_core::config::GraphConfig;
use arbor_core::IDistance;
use petgraph::graph::EdgeIndex;
use petgraph::visit::EdgeRef;
use tracing::{debug, info};

use crate::graph::{MessageNode, MetaGraph};

/// Recency discount parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recency {
    pub alpha: f64,
    pub tau: f64,
    pub time_scale: f64,
}

/// Outcome of a weighting pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightingReport {
    pub nodes_weighted: usize,
    pub edges_weighted: usize,
    /// Edges dropped because their endpoints were too far apart in time.
    pub edges_pruned: usize,
}

/// Assigns prizes and costs to a meta-graph built by [`crate::MetaGraphBuilder`].
pub struct EdgeWeighting {
    distance: Box<dyn IDistance>,
    default_prize: f64,
    recency: Option<Recency>,
    preprune_secs: Option<u64>,
}

impl EdgeWeighting {
    pub fn new(distance: Box<dyn IDistance>) -> Self {
        Self {
            distance,
            default_prize: arbor_core::config::defaults::DEFAULT_PRIZE,
            recency: None,
            preprune_secs: None,
        }
    }

    pub fn from_config(config: &GraphConfig) -> Self {
        let mut weighting =
            Self::new(Box::new(config.distance)).with_default_prize(config.default_prize);
        if config.consider_recency {
            weighting = weighting.with_recency(config.alpha, config.tau, config.time_scale);
        }
        if let Some(secs) = config.preprune_secs {
            weighting = weighting.with_preprune_secs(secs);
        }
        weighting
    }

    pub fn with_default_prize(mut self, prize: f64) -> Self {
        self.default_prize = prize;
        self
    }

    pub fn with_recency(mut self, alpha: f64, tau: f64, time_scale: f64) -> Self {
        self.recency = Some(Recency {
            alpha,
            tau,
            time_scale,
        });
        self
    }

    pub fn with_preprune_secs(mut self, secs: u64) -> Self {
        self.preprune_secs = Some(secs);
        self
    }

    /// Cost of the edge `source → target`. Always finite and non-negative.
    pub fn edge_cost(&self, source: &MessageNode, target: &MessageNode) -> f64 {
        let mut cost = self.distance.distance(&source.topics, &target.topics);
        if let Some(recency) = self.recency {
            let dt = gap_secs(source, target) * recency.time_scale;
            cost -= recency.alpha * recency.tau.powf(dt);
        }
        if cost.is_nan() || cost.is_infinite() {
            // Unusable distances are treated as prohibitively expensive.
            return f64::MAX;
        }
        cost.max(0.0)
    }

    /// Prize of a node: its declared prize, or the default.
    pub fn node_prize(&self, node: &MessageNode) -> f64 {
        if node.is_dummy() {
            return 0.0;
        }
        node.declared_prize.unwrap_or(self.default_prize)
    }

    /// Weight every node and edge of `graph` in place.
    pub fn apply(&self, graph: &mut MetaGraph) -> WeightingReport {
        let mut report = WeightingReport::default();

        for node in graph.graph.node_weights_mut() {
            node.prize = self.node_prize(node);
            report.nodes_weighted += 1;
        }

        if let Some(limit) = self.preprune_secs {
            let before = graph.edge_count();
            let g = &graph.graph;
            let keep: Vec<bool> = g
                .edge_references()
                .map(|e| gap_secs(&g[e.source()], &g[e.target()]) <= limit as f64)
                .collect();
            graph.graph.retain_edges(|_, e: EdgeIndex| keep[e.index()]);
            report.edges_pruned = before - graph.edge_count();
            debug!(
                limit_secs = limit,
                pruned = report.edges_pruned,
                "pre-pruned long-gap edges"
            );
        }

        let costs: Vec<(EdgeIndex, f64)> = graph
            .graph
            .edge_references()
            .map(|e| {
                let cost = self.edge_cost(&graph.graph[e.source()], &graph.graph[e.target()]);
                (e.id(), cost)
            })
            .collect();
        for (edge, cost) in costs {
            graph.graph[edge].cost = cost;
            report.edges_weighted += 1;
        }

        info!(
            distance = self.distance.name(),
            recency = self.recency.is_some(),
            nodes = report.nodes_weighted,
            edges = report.edges_weighted,
            pruned = report.edges_pruned,
            "meta graph weighted"
        );
        report
    }
}

fn gap_secs(source: &MessageNode, target: &MessageNode) -> f64 {
    (target.timestamp - source.timestamp).num_milliseconds() as f64 / 1_000.0
}
