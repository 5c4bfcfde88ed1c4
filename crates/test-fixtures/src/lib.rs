//! Shared builders and fixture loading for Arbor tests and benches.
//!
//! Timestamps are seconds after a fixed epoch so tests read as offsets.

use std::path::PathBuf;

use arbor_core::Interaction;
use arbor_graph::{MessageNode, MetaGraph};
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;

/// Epoch all fixture timestamps are relative to.
pub const EPOCH_SECS: i64 = 1_000_000_000;

/// `EPOCH_SECS + secs` as a UTC timestamp.
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(EPOCH_SECS + secs, 0).unwrap()
}

/// Interaction `id` from `sender` to `recipients` at offset `secs`.
pub fn interaction(id: &str, sender: &str, recipients: &[&str], secs: i64) -> Interaction {
    Interaction::new(
        id,
        sender,
        recipients.iter().map(|r| r.to_string()).collect(),
        ts(secs),
    )
}

/// Real node with an explicit prize.
pub fn node(id: &str, secs: i64, prize: f64) -> MessageNode {
    let mut node = MessageNode::from_interaction(&interaction(id, "s", &[], secs));
    node.prize = prize;
    node.declared_prize = Some(prize);
    node
}

/// Graph from `(id, prize)` nodes and `(source, target, cost)` edges.
/// Node `i` gets timestamp offset `i`.
pub fn graph(nodes: &[(&str, f64)], edges: &[(&str, &str, f64)]) -> MetaGraph {
    let mut g = MetaGraph::new();
    for (i, (id, prize)) in nodes.iter().enumerate() {
        g.add_node(node(id, i as i64, *prize));
    }
    for (source, target, cost) in edges {
        g.add_edge_by_id(source, target, *cost)
            .unwrap_or_else(|| panic!("edge {source} -> {target} names an unknown node"));
    }
    g
}

/// Root `r` with children `c0..c{k-1}`; child `i` costs `i + 1`, every prize is 1.
pub fn star(k: usize) -> MetaGraph {
    let mut g = MetaGraph::new();
    g.add_node(node("r", 0, 1.0));
    for i in 0..k {
        let id = format!("c{i}");
        g.add_node(node(&id, 1 + i as i64, 1.0));
        g.add_edge_by_id("r", &id, 1.0 + i as f64);
    }
    g
}

/// Path `n0 → n1 → … → n{len-1}` with unit prizes and edge `cost`.
pub fn chain(len: usize, cost: f64) -> MetaGraph {
    let mut g = MetaGraph::new();
    for i in 0..len {
        g.add_node(node(&format!("n{i}"), i as i64, 1.0));
        if i > 0 {
            g.add_edge_by_id(&format!("n{}", i - 1), &format!("n{i}"), cost);
        }
    }
    g
}

/// Complete binary tree of the given depth; node `i` has children `2i+1`, `2i+2`.
/// Edge into node `i` costs `1 + (i % 3)`.
pub fn binary_tree(depth: u32) -> MetaGraph {
    let count = (1usize << (depth + 1)) - 1;
    let mut g = MetaGraph::new();
    for i in 0..count {
        g.add_node(node(&format!("t{i:04}"), i as i64, 1.0));
    }
    for i in 1..count {
        let parent = (i - 1) / 2;
        let cost = 1.0 + (i % 3) as f64;
        g.add_edge_by_id(&format!("t{parent:04}"), &format!("t{i:04}"), cost);
    }
    g
}

/// Directory holding fixture data files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// The sample mailing-list thread in `data/thread.json`.
pub fn sample_thread() -> Vec<Interaction> {
    load_fixture("thread.json")
}
