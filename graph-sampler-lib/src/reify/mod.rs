use std::collections::HashSet;
use std::str::FromStr;

use crate::db::DbGraph;
use crate::error::GraphError;
use crate::multigraph::{EdgeAttrs, Multigraph, NodeAttrs, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReifyStrategyName {
    MultiArcsExpansion,
}

impl FromStr for ReifyStrategyName {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multi-arcs-expansion" | "multi_arcs_expansion" => {
                Ok(ReifyStrategyName::MultiArcsExpansion)
            }
            other => Err(GraphError::InvalidParameter(format!(
                "unsupported reification strategy: {}",
                other
            ))),
        }
    }
}

/// Rewrites a database member into a reified copy; the input is untouched.
pub trait ReifyStrategy {
    fn reify(&self, graph: &DbGraph) -> Result<DbGraph, GraphError>;
}

/// Expands multi-arc bundles into intermediate nodes.
///
/// Pairs with a single arc keep it as-is. For a bundle of `n > 1` arcs
/// between `u` and `v`, each arc `e_i` becomes a fresh node `N_i` wired as
/// `u -> N_i -> v`, where the first leg carries `source_label`, the second
/// `target_label`, and `N_i` is labeled with `new_node_prefix` plus the
/// original arc label. Fresh node ids continue above the graph's maximum id.
pub struct MultiArcsExpansion {
    source_label: String,
    target_label: String,
    new_node_prefix: String,
}

impl Default for MultiArcsExpansion {
    fn default() -> Self {
        MultiArcsExpansion {
            source_label: "__source__".to_string(),
            target_label: "__target__".to_string(),
            new_node_prefix: "__edge_".to_string(),
        }
    }
}

impl ReifyStrategy for MultiArcsExpansion {
    fn reify(&self, db_graph: &DbGraph) -> Result<DbGraph, GraphError> {
        let graph = &db_graph.graph;
        let mut reified = Multigraph::new();
        for (id, attrs) in graph.nodes() {
            reified.add_node(id, attrs.clone());
        }

        let mut next_node_id: NodeId = graph.node_ids().max().map(|m| m + 1).unwrap_or(0);

        // Distinct ordered pairs in first-seen order.
        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        for edge in graph.edges() {
            if seen.insert((edge.src, edge.dst)) {
                pairs.push((edge.src, edge.dst));
            }
        }

        for (src, dst) in pairs {
            let keys = graph.keys_between(src, dst);
            if keys.len() == 1 {
                let attrs = graph.edge_attrs(src, dst, keys[0]).cloned().unwrap_or_default();
                reified.add_edge(src, dst, Some(keys[0]), attrs)?;
                continue;
            }
            for key in keys {
                let arc_label = graph
                    .edge_attrs(src, dst, key)
                    .and_then(|attrs| attrs.label.clone())
                    .unwrap_or_default();
                let intermediate = next_node_id;
                next_node_id += 1;

                reified.add_node(
                    intermediate,
                    NodeAttrs::labeled([format!("{}{}", self.new_node_prefix, arc_label)]),
                );
                reified.add_edge(
                    src,
                    intermediate,
                    None,
                    EdgeAttrs::labeled(self.source_label.clone()),
                )?;
                reified.add_edge(
                    intermediate,
                    dst,
                    None,
                    EdgeAttrs::labeled(self.target_label.clone()),
                )?;
            }
        }

        Ok(DbGraph::new(db_graph.graph_id.clone(), reified))
    }
}

pub fn reify_strategy_for(name: ReifyStrategyName) -> Box<dyn ReifyStrategy> {
    match name {
        ReifyStrategyName::MultiArcsExpansion => Box::new(MultiArcsExpansion::default()),
    }
}
