pub mod farthest;
pub mod sketch;

pub use sketch::DistanceSketch;

use std::collections::{HashSet, VecDeque};

use log::{debug, warn};
use rand::Rng;

use crate::db::{DbGraph, GraphDatabase};
use crate::distributions::DistributionStrategy;
use crate::error::GraphError;
use crate::multigraph::{EdgeKey, Multigraph, NodeId};

impl Multigraph {
    /// Selects `k` nodes that are maximally spread out across the graph.
    ///
    /// Uses a landmark distance sketch ([`DistanceSketch`]) as a proxy metric
    /// and greedy farthest-point sampling over it. `k == 0` yields an empty
    /// selection and `k >= node_count` yields every node in insertion order;
    /// neither branch consumes randomness. Otherwise `num_landmarks` must be
    /// positive.
    pub fn extract_k_distant_nodes<R: Rng + ?Sized>(
        &self,
        k: usize,
        num_landmarks: usize,
        rng: &mut R,
    ) -> Result<Vec<NodeId>, GraphError> {
        if k == 0 {
            return Ok(Vec::new());
        }
        if k >= self.node_count() {
            return Ok(self.node_ids().collect());
        }
        if num_landmarks == 0 {
            return Err(GraphError::InvalidParameter(
                "landmark count must be positive".into(),
            ));
        }
        let sketch = DistanceSketch::build(self, num_landmarks, rng);
        Ok(farthest::select_farthest(&sketch, k))
    }

    /// Grows a connected subgraph of at most `num_edges` edges around `source`.
    ///
    /// Breadth-first walk over an edge frontier, treating both edge directions
    /// as explorable. Each edge identity `(src, dst, key)` is collected at most
    /// once, endpoints are copied with their original attributes on first
    /// touch, and the walk returns as soon as the budget is met. The result is
    /// smaller than the budget only when the source's component runs out of
    /// edges; that is not an error, callers cap requests beforehand.
    ///
    /// A budget of zero yields a graph holding just the source node. The input
    /// graph is never mutated.
    pub fn extract_subgraph_by_edge_count(
        &self,
        source: NodeId,
        num_edges: usize,
    ) -> Result<Multigraph, GraphError> {
        if !self.contains_node(source) {
            return Err(GraphError::NodeNotFound(source));
        }

        let mut subgraph = Multigraph::new();
        let copy_node = |subgraph: &mut Multigraph, id: NodeId| {
            if !subgraph.contains_node(id) {
                let attrs = self.node_attrs(id).cloned().unwrap_or_default();
                subgraph.add_node(id, attrs);
            }
        };

        copy_node(&mut subgraph, source);
        if num_edges == 0 {
            return Ok(subgraph);
        }

        let mut queue = VecDeque::new();
        let mut visited_nodes = HashSet::new();
        let mut visited_edges: HashSet<(NodeId, NodeId, EdgeKey)> = HashSet::new();
        let mut collected = 0usize;

        queue.push_back(source);
        visited_nodes.insert(source);

        while let Some(node) = queue.pop_front() {
            for edge in self.incident_edges(node) {
                if !visited_edges.insert(edge.identity()) {
                    continue;
                }

                copy_node(&mut subgraph, edge.src);
                copy_node(&mut subgraph, edge.dst);
                subgraph.add_edge(edge.src, edge.dst, Some(edge.key), edge.attrs.clone())?;
                collected += 1;

                // Keep growing the frontier outward in both directions.
                if visited_nodes.insert(edge.dst) {
                    queue.push_back(edge.dst);
                }
                if visited_nodes.insert(edge.src) {
                    queue.push_back(edge.src);
                }

                if collected >= num_edges {
                    return Ok(subgraph);
                }
            }
        }

        debug!(
            "component around node {} exhausted after {} of {} requested edges",
            source, collected, num_edges
        );
        Ok(subgraph)
    }
}

/// Resolves one drawn budget against the graph's global edge count.
///
/// Negative draws floor at zero; draws above `max_edges` clamp with a warning,
/// the same convenience the original orchestration applies. The clamp does
/// not guarantee that the seed's local component actually holds that many
/// edges.
pub fn resolve_edge_budget(drawn: f64, max_edges: usize) -> usize {
    let requested = drawn.round().max(0.0) as usize;
    if requested > max_edges {
        warn!(
            "requested {} edges, but the graph only has {}; clamping",
            requested, max_edges
        );
        max_edges
    } else {
        requested
    }
}

/// Assembles a database of `db_size` bounded subgraphs.
///
/// Seeds come from [`Multigraph::extract_k_distant_nodes`]; each seed's edge
/// budget is drawn from `distribution` and clamped via [`resolve_edge_budget`].
/// Graph ids are the seeds' ordinal positions.
pub fn assemble_database<R, D>(
    graph: &Multigraph,
    db_size: usize,
    num_landmarks: usize,
    distribution: &mut D,
    rng: &mut R,
) -> Result<GraphDatabase, GraphError>
where
    R: Rng + ?Sized,
    D: DistributionStrategy + ?Sized,
{
    let max_edges = graph.edge_count();
    let seeds = graph.extract_k_distant_nodes(db_size, num_landmarks, rng)?;

    let mut db = GraphDatabase::new();
    for (i, seed) in seeds.into_iter().enumerate() {
        let budget = resolve_edge_budget(distribution.next(), max_edges);
        let subgraph = graph.extract_subgraph_by_edge_count(seed, budget)?;
        db.add_graph(DbGraph::new(i.to_string(), subgraph));
    }
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::FixedDistribution;
    use crate::multigraph::{EdgeAttrs, NodeAttrs};
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Graph from the extraction scenarios: two parallel 0->1 edges, then a
    /// path on to 2 and 3.
    fn parallel_edge_graph() -> Multigraph {
        let mut g = Multigraph::new();
        for id in 0..4 {
            g.add_node(id, NodeAttrs::labeled([format!("n{}", id)]));
        }
        g.add_edge(0, 1, Some(0), EdgeAttrs::labeled("a")).unwrap();
        g.add_edge(0, 1, Some(1), EdgeAttrs::labeled("b")).unwrap();
        g.add_edge(1, 2, Some(0), EdgeAttrs::labeled("c")).unwrap();
        g.add_edge(2, 3, Some(0), EdgeAttrs::labeled("d")).unwrap();
        g
    }

    #[test]
    fn test_budget_zero_yields_source_only() {
        let g = parallel_edge_graph();
        let sub = g.extract_subgraph_by_edge_count(0, 0).unwrap();
        assert_eq!(sub.node_count(), 1);
        assert_eq!(sub.edge_count(), 0);
        assert_eq!(sub.node_attrs(0), g.node_attrs(0));
    }

    #[test]
    fn test_budget_two_collects_only_the_parallel_pair() {
        let g = parallel_edge_graph();
        let sub = g.extract_subgraph_by_edge_count(0, 2).unwrap();

        assert_eq!(sub.node_ids().sorted().collect_vec(), vec![0, 1]);
        assert_eq!(sub.edge_count(), 2);
        assert!(sub.contains_edge(0, 1, 0));
        assert!(sub.contains_edge(0, 1, 1));
        assert!(!sub.contains_node(2));
        assert!(!sub.contains_node(3));
    }

    #[test]
    fn test_budget_above_total_returns_whole_component() {
        let g = parallel_edge_graph();
        let sub = g.extract_subgraph_by_edge_count(0, 10).unwrap();
        assert_eq!(sub.node_count(), 4);
        assert_eq!(sub.edge_count(), 4);
    }

    #[test]
    fn test_extraction_preserves_attributes() {
        let g = parallel_edge_graph();
        let sub = g.extract_subgraph_by_edge_count(3, 10).unwrap();
        for (id, attrs) in sub.nodes() {
            assert_eq!(Some(attrs), g.node_attrs(id));
        }
        for edge in sub.edges() {
            assert_eq!(Some(edge.attrs), g.edge_attrs(edge.src, edge.dst, edge.key));
        }
    }

    #[test]
    fn test_no_edge_identity_collected_twice() {
        let g = parallel_edge_graph();
        for budget in 1..=4 {
            let sub = g.extract_subgraph_by_edge_count(1, budget).unwrap();
            let identities = sub.edges().map(|e| e.identity()).collect_vec();
            assert_eq!(identities.iter().unique().count(), identities.len());
            assert_eq!(sub.edge_count(), budget);
        }
    }

    #[test]
    fn test_cycle_does_not_loop_forever() {
        let mut g = Multigraph::new();
        for i in 0..3 {
            g.add_edge(i, (i + 1) % 3, None, EdgeAttrs::default()).unwrap();
        }
        let sub = g.extract_subgraph_by_edge_count(0, 100).unwrap();
        assert_eq!(sub.edge_count(), 3);
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let g = parallel_edge_graph();
        let err = g.extract_subgraph_by_edge_count(42, 1).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(42)));
    }

    #[test]
    fn test_distant_nodes_degenerate_branches() {
        let g = parallel_edge_graph();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(g.extract_k_distant_nodes(0, 3, &mut rng).unwrap().is_empty());

        let all = g.extract_k_distant_nodes(10, 3, &mut rng).unwrap();
        assert_eq!(all, vec![0, 1, 2, 3]);

        // Zero landmarks only matters when a sketch is actually needed.
        assert!(g.extract_k_distant_nodes(4, 0, &mut rng).is_ok());
        assert!(matches!(
            g.extract_k_distant_nodes(2, 0, &mut rng),
            Err(GraphError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_distant_nodes_are_distinct_and_present() {
        let mut g = Multigraph::new();
        for i in 0..20 {
            g.add_edge(i, i + 1, None, EdgeAttrs::default()).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(7);
        let selected = g.extract_k_distant_nodes(5, 4, &mut rng).unwrap();
        assert_eq!(selected.len(), 5);
        assert_eq!(selected.iter().unique().count(), 5);
        for id in &selected {
            assert!(g.contains_node(*id));
        }
    }

    #[test]
    fn test_distant_nodes_deterministic_under_fixed_seed() {
        let mut g = Multigraph::new();
        for i in 0..50 {
            g.add_edge(i, (i * 7 + 3) % 50, None, EdgeAttrs::default())
                .unwrap();
        }
        let first = g
            .extract_k_distant_nodes(6, 5, &mut StdRng::seed_from_u64(99))
            .unwrap();
        let second = g
            .extract_k_distant_nodes(6, 5, &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_edge_budget_clamps() {
        assert_eq!(resolve_edge_budget(-3.0, 10), 0);
        assert_eq!(resolve_edge_budget(4.4, 10), 4);
        assert_eq!(resolve_edge_budget(4.6, 10), 5);
        assert_eq!(resolve_edge_budget(25.0, 10), 10);
    }

    #[test]
    fn test_assemble_database_sizes_and_ids() {
        let mut g = Multigraph::new();
        for i in 0..30 {
            g.add_edge(i, i + 1, None, EdgeAttrs::default()).unwrap();
        }
        let mut distribution = FixedDistribution::new(5.0);
        let mut rng = StdRng::seed_from_u64(3);

        let db = assemble_database(&g, 4, 3, &mut distribution, &mut rng).unwrap();
        assert_eq!(db.len(), 4);
        for (i, member) in db.graphs().iter().enumerate() {
            assert_eq!(member.graph_id, i.to_string());
            assert_eq!(member.graph.edge_count(), 5);
        }
    }
}
