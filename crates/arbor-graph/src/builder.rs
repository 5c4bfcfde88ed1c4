//! Meta-graph construction from time-ordered interactions.
//!
//! Every identity (sender or recipient address) owns a slot of pending nodes
//! that last touched it. A new interaction drains the slots of its sender and
//! recipients, linking each drained node to itself, then registers itself in
//! those same slots. A drained entry is consumed: it can feed at most one
//! causal descendant through that slot, which keeps fan-in tree-like instead
//! of producing an all-pairs graph.

use std::collections::{HashMap, HashSet};

use arbor_core::errors::GraphError;
use arbor_core::Interaction;
use petgraph::graph::NodeIndex;
use tracing::{debug, info};

use crate::graph::{MessageNode, MetaGraph};

/// Builds the causal meta-graph. Edge costs are left at zero; see
/// [`crate::weighting::EdgeWeighting`].
#[derive(Debug, Clone, Default)]
pub struct MetaGraphBuilder;

impl MetaGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build from interactions already sorted ascending by `(timestamp, id)`.
    ///
    /// Input is validated in full before any node is created.
    pub fn build(&self, interactions: &[Interaction]) -> Result<MetaGraph, GraphError> {
        validate(interactions)?;

        let mut graph = MetaGraph::new();
        let mut slots: HashMap<&str, Vec<NodeIndex>> = HashMap::new();

        for interaction in interactions {
            let node = graph.add_node(MessageNode::from_interaction(interaction));
            let identities = identities(interaction);

            let mut linked = HashSet::new();
            let mut parents = Vec::new();
            for identity in &identities {
                if let Some(pending) = slots.get_mut(identity) {
                    for parent in pending.drain(..) {
                        if parent != node && linked.insert(parent) {
                            parents.push(parent);
                        }
                    }
                }
            }
            for parent in parents {
                graph.add_edge(parent, node, 0.0);
            }

            for identity in identities {
                slots.entry(identity).or_default().push(node);
            }
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "meta graph built"
        );
        Ok(graph)
    }

    /// Sort by `(timestamp, id)` and build.
    pub fn build_unsorted(
        &self,
        mut interactions: Vec<Interaction>,
    ) -> Result<MetaGraph, GraphError> {
        interactions.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
        debug!(count = interactions.len(), "sorted interactions");
        self.build(&interactions)
    }
}

/// Sender first, then each distinct recipient other than the sender.
fn identities(interaction: &Interaction) -> Vec<&str> {
    let sender = interaction.sender.as_str();
    std::iter::once(sender)
        .chain(
            interaction
                .unique_recipients()
                .into_iter()
                .filter(|r| *r != sender),
        )
        .collect()
}

fn validate(interactions: &[Interaction]) -> Result<(), GraphError> {
    let mut seen = HashSet::with_capacity(interactions.len());
    let mut previous: Option<&Interaction> = None;

    for interaction in interactions {
        let invalid = |reason: String| GraphError::InvalidInteraction {
            id: interaction.id.clone(),
            reason,
        };

        if interaction.id.is_empty() {
            return Err(invalid("empty id".to_string()));
        }
        if interaction.sender.is_empty() {
            return Err(invalid("missing sender".to_string()));
        }
        if let Some(prize) = interaction.prize {
            if !prize.is_finite() || prize < 0.0 {
                let reason = format!("prize {prize} must be finite and non-negative");
                return Err(invalid(reason));
            }
        }
        if interaction.topics.iter().any(|w| !w.is_finite()) {
            return Err(invalid("non-finite topic weight".to_string()));
        }
        if !seen.insert(interaction.id.as_str()) {
            return Err(invalid("duplicate id".to_string()));
        }
        if let Some(prev) = previous {
            if prev.order_key() >= interaction.order_key() {
                return Err(invalid(format!(
                    "out of order: follows {} at {}",
                    prev.id, prev.timestamp
                )));
            }
        }
        previous = Some(interaction);
    }
    Ok(())
}
