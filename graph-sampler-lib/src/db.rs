use std::fmt;

use serde::{Deserialize, Serialize};

use crate::multigraph::Multigraph;

/// Bookkeeping identifier of a graph inside a database.
///
/// Opaque to the algorithms; the `.data` format carries arbitrary tokens
/// in its `t # <id>` headers, so a string covers both numeric and named ids.
pub type GraphId = String;

/// A graph that is a member of a [`GraphDatabase`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DbGraph {
    pub graph_id: GraphId,
    pub graph: Multigraph,
}

impl DbGraph {
    pub fn new<I: Into<GraphId>>(graph_id: I, graph: Multigraph) -> Self {
        DbGraph {
            graph_id: graph_id.into(),
            graph,
        }
    }
}

/// Ordered collection of graphs.
///
/// Insertion order is the only ordering guarantee. No uniqueness constraint
/// is imposed on member ids; callers assign them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphDatabase {
    graphs: Vec<DbGraph>,
}

impl GraphDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_graphs(graphs: Vec<DbGraph>) -> Self {
        GraphDatabase { graphs }
    }

    pub fn add_graph(&mut self, graph: DbGraph) {
        self.graphs.push(graph);
    }

    pub fn graphs(&self) -> &[DbGraph] {
        &self.graphs
    }

    pub fn into_graphs(self) -> Vec<DbGraph> {
        self.graphs
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Summary statistics over the member graphs.
    pub fn stats(&self) -> DatabaseStats {
        let count = self.graphs.len();
        let total_nodes: usize = self.graphs.iter().map(|g| g.graph.node_count()).sum();
        let total_edges: usize = self.graphs.iter().map(|g| g.graph.edge_count()).sum();
        let mean_nodes = mean(total_nodes, count);
        let mean_edges = mean(total_edges, count);
        DatabaseStats {
            graphs: count,
            total_nodes,
            total_edges,
            mean_nodes,
            mean_edges,
            std_nodes: std_dev(self.graphs.iter().map(|g| g.graph.node_count()), mean_nodes, count),
            std_edges: std_dev(self.graphs.iter().map(|g| g.graph.edge_count()), mean_edges, count),
        }
    }
}

fn mean(total: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

fn std_dev<I: Iterator<Item = usize>>(values: I, mean: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let variance: f64 = values.map(|v| (v as f64 - mean).powi(2)).sum::<f64>() / count as f64;
    variance.sqrt()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DatabaseStats {
    pub graphs: usize,
    pub total_nodes: usize,
    pub total_edges: usize,
    pub mean_nodes: f64,
    pub mean_edges: f64,
    pub std_nodes: f64,
    pub std_edges: f64,
}

impl fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total graphs: {}", self.graphs)?;
        writeln!(
            f,
            "Total nodes: {} (mean {:.2}, std {:.2})",
            self.total_nodes, self.mean_nodes, self.std_nodes
        )?;
        write!(
            f,
            "Total edges: {} (mean {:.2}, std {:.2})",
            self.total_edges, self.mean_edges, self.std_edges
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multigraph::EdgeAttrs;

    fn graph_with_edges(edges: usize) -> Multigraph {
        let mut g = Multigraph::new();
        for i in 0..edges as u64 {
            g.add_edge(i, i + 1, None, EdgeAttrs::default()).unwrap();
        }
        g
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut db = GraphDatabase::new();
        for id in ["2", "0", "1"].iter() {
            db.add_graph(DbGraph::new(*id, Multigraph::new()));
        }
        let ids: Vec<_> = db.graphs().iter().map(|g| g.graph_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "0", "1"]);
    }

    #[test]
    fn test_stats_empty_database() {
        let stats = GraphDatabase::new().stats();
        assert_eq!(stats.graphs, 0);
        assert_eq!(stats.mean_nodes, 0.0);
        assert_eq!(stats.std_edges, 0.0);
    }

    #[test]
    fn test_stats_mean_and_std() {
        let mut db = GraphDatabase::new();
        db.add_graph(DbGraph::new("0", graph_with_edges(2)));
        db.add_graph(DbGraph::new("1", graph_with_edges(4)));

        let stats = db.stats();
        assert_eq!(stats.graphs, 2);
        assert_eq!(stats.total_edges, 6);
        assert_eq!(stats.mean_edges, 3.0);
        assert_eq!(stats.std_edges, 1.0);
        // Path graphs: edges + 1 nodes each.
        assert_eq!(stats.total_nodes, 8);
        assert_eq!(stats.mean_nodes, 4.0);
    }
}
