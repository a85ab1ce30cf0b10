use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::error::GraphError;
use crate::multigraph::{Multigraph, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelStrategyName {
    None,
    Random,
    Community,
}

impl FromStr for LabelStrategyName {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(LabelStrategyName::None),
            "random" => Ok(LabelStrategyName::Random),
            "community" => Ok(LabelStrategyName::Community),
            other => Err(GraphError::InvalidParameter(format!(
                "unsupported label strategy: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for LabelStrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelStrategyName::None => write!(f, "none"),
            LabelStrategyName::Random => write!(f, "random"),
            LabelStrategyName::Community => write!(f, "community"),
        }
    }
}

/// Assigns labels to an already generated graph, in place.
pub trait LabelStrategy {
    fn assign(&mut self, graph: &mut Multigraph, rng: &mut dyn RngCore) -> Result<(), GraphError>;
}

/// Cycling cursor over a label set.
///
/// Restartable replacement for exhausting a pool and starting over; an empty
/// pool simply yields nothing.
pub struct LabelPool {
    labels: Vec<String>,
    cursor: usize,
}

impl LabelPool {
    pub fn new(labels: Vec<String>) -> Self {
        LabelPool { labels, cursor: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn next_label(&mut self) -> Option<String> {
        if self.labels.is_empty() {
            return None;
        }
        let label = self.labels[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.labels.len();
        Some(label)
    }
}

pub struct NoneLabels;

impl LabelStrategy for NoneLabels {
    fn assign(&mut self, _graph: &mut Multigraph, _rng: &mut dyn RngCore) -> Result<(), GraphError> {
        Ok(())
    }
}

/// Uniformly random labels from the provided pools.
pub struct RandomLabels {
    node_labels: Vec<String>,
    edge_labels: Vec<String>,
}

impl RandomLabels {
    pub fn new(node_labels: Vec<String>, edge_labels: Vec<String>) -> Result<Self, GraphError> {
        if node_labels.is_empty() || edge_labels.is_empty() {
            return Err(GraphError::InvalidParameter(
                "random labeling needs non-empty node and edge label sets".into(),
            ));
        }
        Ok(RandomLabels {
            node_labels,
            edge_labels,
        })
    }
}

impl LabelStrategy for RandomLabels {
    fn assign(&mut self, graph: &mut Multigraph, rng: &mut dyn RngCore) -> Result<(), GraphError> {
        let node_ids = graph.node_ids().collect_vec();
        for id in node_ids {
            let label = self.node_labels.choose(rng).cloned().unwrap();
            if let Some(attrs) = graph.node_attrs_mut(id) {
                attrs.labels = vec![label];
            }
        }

        let edges = graph.edges().map(|e| e.identity()).collect_vec();
        for (src, dst, key) in edges {
            let label = self.edge_labels.choose(rng).cloned().unwrap();
            if let Some(attrs) = graph.edge_attrs_mut(src, dst, key) {
                attrs.label = Some(label);
            }
        }
        Ok(())
    }
}

/// Community-based labels.
///
/// Communities are detected by label propagation over the undirected view;
/// each community takes the next label from the node pool (or its ordinal
/// when the pool is empty). Edge labels come from the edge pool, falling back
/// to "1" for intra-community and "0" for inter-community edges.
pub struct CommunityLabels {
    node_pool: LabelPool,
    edge_pool: LabelPool,
    max_rounds: usize,
}

impl CommunityLabels {
    pub fn new(node_labels: Vec<String>, edge_labels: Vec<String>) -> Self {
        CommunityLabels {
            node_pool: LabelPool::new(node_labels),
            edge_pool: LabelPool::new(edge_labels),
            max_rounds: 30,
        }
    }
}

impl LabelStrategy for CommunityLabels {
    fn assign(&mut self, graph: &mut Multigraph, rng: &mut dyn RngCore) -> Result<(), GraphError> {
        let communities = label_propagation_communities(graph, self.max_rounds, rng);

        for (i, community) in communities.iter().enumerate() {
            let label = self.node_pool.next_label().unwrap_or_else(|| i.to_string());
            for &node in community {
                if let Some(attrs) = graph.node_attrs_mut(node) {
                    attrs.labels = vec![label.clone()];
                }
            }
        }

        let edges = graph.edges().map(|e| e.identity()).collect_vec();
        for (src, dst, key) in edges {
            let same_community = graph.node_attrs(src).map(|a| &a.labels)
                == graph.node_attrs(dst).map(|a| &a.labels);
            let label = self
                .edge_pool
                .next_label()
                .unwrap_or_else(|| if same_community { "1" } else { "0" }.to_string());
            if let Some(attrs) = graph.edge_attrs_mut(src, dst, key) {
                attrs.label = Some(label);
            }
        }
        Ok(())
    }
}

/// Synchronous label propagation; parallel edges weigh their endpoints'
/// votes accordingly. Ties resolve to the smallest community id so that runs
/// with the same shuffle order converge identically.
fn label_propagation_communities(
    graph: &Multigraph,
    max_rounds: usize,
    rng: &mut dyn RngCore,
) -> Vec<Vec<NodeId>> {
    let mut community: HashMap<NodeId, usize> = graph
        .node_ids()
        .enumerate()
        .map(|(i, id)| (id, i))
        .collect();
    let mut order = graph.node_ids().collect_vec();

    for _ in 0..max_rounds {
        order.shuffle(rng);
        let mut changed = false;

        for &node in &order {
            let mut votes: HashMap<usize, usize> = HashMap::new();
            for edge in graph.incident_edges(node) {
                let other = if edge.src == node { edge.dst } else { edge.src };
                *votes.entry(community[&other]).or_insert(0) += 1;
            }
            if votes.is_empty() {
                continue;
            }
            let (&winner, _) = votes
                .iter()
                .max_by_key(|(&comm, &count)| (count, std::cmp::Reverse(comm)))
                .unwrap();
            if community[&node] != winner {
                community.insert(node, winner);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let mut grouped: HashMap<usize, Vec<NodeId>> = HashMap::new();
    for id in graph.node_ids() {
        grouped.entry(community[&id]).or_default().push(id);
    }
    grouped
        .into_iter()
        .sorted_by_key(|(comm, _)| *comm)
        .map(|(_, members)| members)
        .collect_vec()
}

/// Strategy factory; `none` ignores the pools.
pub fn label_strategy_for(
    name: LabelStrategyName,
    node_labels: Vec<String>,
    edge_labels: Vec<String>,
) -> Result<Box<dyn LabelStrategy>, GraphError> {
    match name {
        LabelStrategyName::None => Ok(Box::new(NoneLabels)),
        LabelStrategyName::Random => Ok(Box::new(RandomLabels::new(node_labels, edge_labels)?)),
        LabelStrategyName::Community => Ok(Box::new(CommunityLabels::new(node_labels, edge_labels))),
    }
}
