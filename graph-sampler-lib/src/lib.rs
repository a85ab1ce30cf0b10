pub mod alter;
pub mod caches;
pub mod db;
pub mod distributions;
pub mod error;
pub mod generator;
pub mod multigraph;
pub mod reader;
pub mod reify;
pub mod sampling;
pub mod saver;

pub use db::{DbGraph, GraphDatabase, GraphId};
pub use error::GraphError;
pub use multigraph::{EdgeAttrs, EdgeKey, Multigraph, NodeAttrs, NodeId};
pub use sampling::{assemble_database, resolve_edge_budget, DistanceSketch};

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::distributions::UniformDistribution;
    use crate::generator::labels::{label_strategy_for, LabelStrategyName};
    use crate::generator::{generator_for, GraphStrategy};
    use crate::reader::{reader_for, GraphReader, InputFormat};
    use crate::saver::{saver_for, GraphSaver, OutputFormat};

    #[test]
    fn test_generate_label_and_assemble() -> Result<(), GraphError> {
        let mut rng = StdRng::seed_from_u64(7);

        let generator = generator_for(GraphStrategy::BarabasiAlbert, 60, 120)?;
        let mut graph = generator.generate(&mut rng)?;
        assert_eq!(graph.node_count(), 60);

        let mut labeler = label_strategy_for(
            LabelStrategyName::Random,
            vec!["a".into(), "b".into()],
            vec!["x".into()],
        )?;
        labeler.assign(&mut graph, &mut rng)?;
        assert!(graph.nodes().all(|(_, attrs)| !attrs.labels.is_empty()));

        let mut distribution = UniformDistribution::new(5.0, 20.0, StdRng::seed_from_u64(8))?;
        let database = assemble_database(&graph, 10, 4, &mut distribution, &mut rng)?;
        assert_eq!(database.len(), 10);
        for entry in database.graphs() {
            assert!(entry.graph.node_count() >= 1);
            assert!(entry.graph.edge_count() <= 20);
        }
        Ok(())
    }

    #[test]
    fn test_save_and_read_database_roundtrip() -> Result<(), GraphError> {
        let mut rng = StdRng::seed_from_u64(11);

        let generator = generator_for(GraphStrategy::Uniform, 30, 50)?;
        let mut graph = generator.generate(&mut rng)?;
        let mut labeler = label_strategy_for(
            LabelStrategyName::Random,
            vec!["p".into(), "q".into()],
            vec!["r".into()],
        )?;
        labeler.assign(&mut graph, &mut rng)?;

        let mut distribution = UniformDistribution::new(3.0, 10.0, StdRng::seed_from_u64(12))?;
        let database = assemble_database(&graph, 5, 3, &mut distribution, &mut rng)?;

        let path = std::env::temp_dir().join("graph_sampler_lib_roundtrip.data");
        let saver = saver_for(OutputFormat::Data);
        saver.save_db(&database, &path, false)?;

        let reader = reader_for(InputFormat::Data);
        let restored = reader.read_db(&path)?;
        assert_eq!(restored.len(), database.len());
        for (a, b) in database.graphs().iter().zip(restored.graphs()) {
            assert_eq!(a.graph_id, b.graph_id);
            assert_eq!(a.graph.node_count(), b.graph.node_count());
            assert_eq!(a.graph.edge_count(), b.graph.edge_count());
        }
        Ok(())
    }
}
