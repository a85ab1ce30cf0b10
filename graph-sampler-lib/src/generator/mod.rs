pub mod labels;

use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngCore};

use crate::error::GraphError;
use crate::multigraph::{EdgeAttrs, Multigraph, NodeAttrs, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphStrategy {
    BarabasiAlbert,
    Uniform,
}

impl FromStr for GraphStrategy {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "barabasi-albert" | "barabasi_albert" => Ok(GraphStrategy::BarabasiAlbert),
            "uniform" | "random" => Ok(GraphStrategy::Uniform),
            other => Err(GraphError::InvalidParameter(format!(
                "unsupported graph strategy: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for GraphStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphStrategy::BarabasiAlbert => write!(f, "barabasi-albert"),
            GraphStrategy::Uniform => write!(f, "uniform"),
        }
    }
}

/// Produces an unlabeled multigraph; labels are a separate pass.
pub trait GeneratorStrategy {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Multigraph, GraphError>;
}

/// Scale-free graphs via preferential attachment.
///
/// Each new node attaches to `connectivity` distinct existing nodes, drawn
/// proportionally to degree through the classic repeated-endpoints list.
pub struct BarabasiAlbertGenerator {
    num_nodes: usize,
    connectivity: usize,
}

impl BarabasiAlbertGenerator {
    pub fn new(num_nodes: usize, connectivity: usize) -> Result<Self, GraphError> {
        if connectivity == 0 || num_nodes <= connectivity {
            return Err(GraphError::InvalidParameter(format!(
                "barabasi-albert needs 1 <= connectivity < num_nodes, got {} and {}",
                connectivity, num_nodes
            )));
        }
        Ok(BarabasiAlbertGenerator {
            num_nodes,
            connectivity,
        })
    }
}

impl GeneratorStrategy for BarabasiAlbertGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Multigraph, GraphError> {
        let m = self.connectivity;
        let mut graph = Multigraph::new();
        for id in 0..m as NodeId {
            graph.add_node(id, NodeAttrs::default());
        }

        // Endpoints repeated by degree; new nodes appear m times themselves.
        let mut repeated: Vec<NodeId> = Vec::with_capacity(2 * m * self.num_nodes);
        let mut targets: Vec<NodeId> = (0..m as NodeId).collect();

        for new in m..self.num_nodes {
            let new = new as NodeId;
            graph.add_node(new, NodeAttrs::default());
            for &target in &targets {
                graph.add_edge(new, target, None, EdgeAttrs::default())?;
            }
            repeated.extend(targets.iter().copied());
            repeated.extend(std::iter::repeat(new).take(m));

            let mut next = Vec::with_capacity(m);
            while next.len() < m {
                let candidate = repeated[rng.gen_range(0..repeated.len())];
                if !next.contains(&candidate) {
                    next.push(candidate);
                }
            }
            targets = next;
        }
        Ok(graph)
    }
}

/// Uniform G(n, m): every edge picks both endpoints uniformly at random.
/// Parallel edges and self-loops are allowed, which keeps the output an
/// honest multigraph.
pub struct UniformGenerator {
    num_nodes: usize,
    num_edges: usize,
}

impl UniformGenerator {
    pub fn new(num_nodes: usize, num_edges: usize) -> Result<Self, GraphError> {
        if num_nodes == 0 {
            return Err(GraphError::InvalidParameter(
                "uniform generation needs at least one node".into(),
            ));
        }
        Ok(UniformGenerator {
            num_nodes,
            num_edges,
        })
    }
}

impl GeneratorStrategy for UniformGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Multigraph, GraphError> {
        let mut graph = Multigraph::new();
        for id in 0..self.num_nodes as NodeId {
            graph.add_node(id, NodeAttrs::default());
        }
        for _ in 0..self.num_edges {
            let src = rng.gen_range(0..self.num_nodes) as NodeId;
            let dst = rng.gen_range(0..self.num_nodes) as NodeId;
            graph.add_edge(src, dst, None, EdgeAttrs::default())?;
        }
        Ok(graph)
    }
}

/// Strategy factory. For Barabási–Albert the edge count is translated into a
/// per-node connectivity of `max(1, num_edges / num_nodes)`.
pub fn generator_for(
    strategy: GraphStrategy,
    num_nodes: usize,
    num_edges: usize,
) -> Result<Box<dyn GeneratorStrategy>, GraphError> {
    match strategy {
        GraphStrategy::BarabasiAlbert => {
            let connectivity = std::cmp::max(1, num_edges / num_nodes.max(1));
            Ok(Box::new(BarabasiAlbertGenerator::new(
                num_nodes,
                connectivity,
            )?))
        }
        GraphStrategy::Uniform => Ok(Box::new(UniformGenerator::new(num_nodes, num_edges)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_barabasi_albert_counts() {
        let mut rng = StdRng::seed_from_u64(11);
        let generator = BarabasiAlbertGenerator::new(50, 3).unwrap();
        let graph = generator.generate(&mut rng).unwrap();

        assert_eq!(graph.node_count(), 50);
        // Every node beyond the m seed nodes contributes exactly m edges.
        assert_eq!(graph.edge_count(), (50 - 3) * 3);
    }

    #[test]
    fn test_barabasi_albert_attaches_to_distinct_targets() {
        let mut rng = StdRng::seed_from_u64(2);
        let generator = BarabasiAlbertGenerator::new(30, 2).unwrap();
        let graph = generator.generate(&mut rng).unwrap();
        for src in 2..30u64 {
            // No parallel edges out of a fresh node: targets were distinct.
            for dst in graph.neighbors(src).unwrap() {
                assert!(graph.edge_count_between(src, dst) <= 1);
            }
        }
    }

    #[test]
    fn test_barabasi_albert_rejects_bad_parameters() {
        assert!(BarabasiAlbertGenerator::new(3, 0).is_err());
        assert!(BarabasiAlbertGenerator::new(3, 3).is_err());
    }

    #[test]
    fn test_uniform_generates_requested_counts() {
        let mut rng = StdRng::seed_from_u64(5);
        let generator = UniformGenerator::new(10, 40).unwrap();
        let graph = generator.generate(&mut rng).unwrap();
        assert_eq!(graph.node_count(), 10);
        assert_eq!(graph.edge_count(), 40);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(
            "barabasi-albert".parse::<GraphStrategy>().unwrap(),
            GraphStrategy::BarabasiAlbert
        );
        assert_eq!(
            "random".parse::<GraphStrategy>().unwrap(),
            GraphStrategy::Uniform
        );
        assert!("grid".parse::<GraphStrategy>().is_err());
    }
}
