use std::str::FromStr;

use itertools::Itertools;
use rand::{Rng, RngCore};

use crate::db::DbGraph;
use crate::error::GraphError;
use crate::multigraph::EdgeAttrs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlterOption {
    MultiEdge,
}

impl FromStr for AlterOption {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multi-edge" | "to-multigraph" | "to_multigraph" => Ok(AlterOption::MultiEdge),
            other => Err(GraphError::InvalidParameter(format!(
                "unsupported alteration strategy: {}",
                other
            ))),
        }
    }
}

/// Rewrites a database member into an altered copy; the input is untouched.
pub trait AlterStrategy {
    fn alter(&self, graph: &DbGraph, rng: &mut dyn RngCore) -> Result<DbGraph, GraphError>;

    /// Human-readable diff summary for logs.
    fn what_changed(&self, original: &DbGraph, altered: &DbGraph) -> String;
}

/// Converts a graph into a denser multigraph by duplicating edges.
///
/// Each original edge is, with `assign_probability`, joined by `K` extra
/// parallel edges (`K` uniform in `k_min..=k_max`) labeled
/// `extra_<original label>`.
pub struct MultiEdgeAlter {
    k_min: u32,
    k_max: u32,
    assign_probability: f64,
}

impl MultiEdgeAlter {
    pub fn new(k: (u32, u32), assign_probability: f64) -> Result<Self, GraphError> {
        let (k_min, k_max) = k;
        if k_min > k_max {
            return Err(GraphError::InvalidParameter(format!(
                "edge multiplicity range {}..{} is empty",
                k_min, k_max
            )));
        }
        if !(0.0..=1.0).contains(&assign_probability) {
            return Err(GraphError::InvalidParameter(format!(
                "assign probability {} is not within [0, 1]",
                assign_probability
            )));
        }
        Ok(MultiEdgeAlter {
            k_min,
            k_max,
            assign_probability,
        })
    }
}

impl AlterStrategy for MultiEdgeAlter {
    fn alter(&self, graph: &DbGraph, rng: &mut dyn RngCore) -> Result<DbGraph, GraphError> {
        let mut altered = graph.clone();
        let originals = graph
            .graph
            .edges()
            .map(|e| (e.src, e.dst, e.attrs.label.clone()))
            .collect_vec();

        for (src, dst, label) in originals {
            if rng.gen::<f64>() >= self.assign_probability {
                continue;
            }
            let extra = rng.gen_range(self.k_min..=self.k_max);
            for _ in 0..extra {
                let label = format!("extra_{}", label.as_deref().unwrap_or(""));
                altered
                    .graph
                    .add_edge(src, dst, None, EdgeAttrs::labeled(label))?;
            }
        }
        Ok(altered)
    }

    fn what_changed(&self, original: &DbGraph, altered: &DbGraph) -> String {
        let before = original.graph.edge_count();
        let after = altered.graph.edge_count();
        format!(
            "converted to multigraph by adding {} edges (from {} to {})",
            after - before,
            before,
            after
        )
    }
}

/// Factory with the stock parameters: up to two duplicates, one edge in five.
pub fn alter_strategy_for(option: AlterOption) -> Result<Box<dyn AlterStrategy>, GraphError> {
    match option {
        AlterOption::MultiEdge => Ok(Box::new(MultiEdgeAlter::new((2, 2), 0.2)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multigraph::Multigraph;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn labeled_line(edges: u64) -> DbGraph {
        let mut g = Multigraph::new();
        for i in 0..edges {
            g.add_edge(i, i + 1, None, EdgeAttrs::labeled("road")).unwrap();
        }
        DbGraph::new("g", g)
    }

    #[test]
    fn test_probability_zero_changes_nothing() {
        let original = labeled_line(10);
        let strategy = MultiEdgeAlter::new((2, 2), 0.0).unwrap();
        let altered = strategy
            .alter(&original, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(altered.graph.edge_count(), original.graph.edge_count());
    }

    #[test]
    fn test_probability_one_duplicates_every_edge() {
        let original = labeled_line(5);
        let strategy = MultiEdgeAlter::new((3, 3), 1.0).unwrap();
        let altered = strategy
            .alter(&original, &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert_eq!(altered.graph.edge_count(), 5 + 5 * 3);
        // Originals survive untouched, duplicates carry the prefixed label.
        for i in 0..5 {
            assert_eq!(altered.graph.edge_count_between(i, i + 1), 4);
            assert_eq!(
                altered.graph.edge_attrs(i, i + 1, 0).unwrap().label.as_deref(),
                Some("road")
            );
            assert_eq!(
                altered.graph.edge_attrs(i, i + 1, 1).unwrap().label.as_deref(),
                Some("extra_road")
            );
        }
        // Input graph untouched.
        assert_eq!(original.graph.edge_count(), 5);
    }

    #[test]
    fn test_what_changed_reports_delta() {
        let original = labeled_line(4);
        let strategy = MultiEdgeAlter::new((1, 1), 1.0).unwrap();
        let altered = strategy
            .alter(&original, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let summary = strategy.what_changed(&original, &altered);
        assert!(summary.contains("adding 4 edges"));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(MultiEdgeAlter::new((3, 1), 0.5).is_err());
        assert!(MultiEdgeAlter::new((1, 2), 1.5).is_err());
    }
}
