use std::error::Error;

use graph_sampler_cli::app::build_cli;
use graph_sampler_cli::run_subcommand;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let matches = build_cli().get_matches();

    run_subcommand(matches)?;

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use std::error::Error;
    use std::path::Path;

    use graph_sampler_cli::generate::get_or_generate;
    use graph_sampler_lib::caches::{create_sqlite_cache, GraphSqliteCache};
    use graph_sampler_lib::generator::labels::LabelStrategyName;
    use graph_sampler_lib::generator::GraphStrategy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_create_cache() -> Result<(), Box<dyn Error>> {
        let path = "/tmp/graph_sampler_test_cache_0.db";
        let _ = std::fs::remove_file(path);
        create_sqlite_cache(path)?;
        Ok(())
    }

    #[test]
    fn test_generate_graphs_cached() -> Result<(), Box<dyn Error>> {
        let path = "/tmp/graph_sampler_test_cache_1.db";
        let _ = std::fs::remove_file(path);
        create_sqlite_cache(path)?;

        let mut cache = GraphSqliteCache::open(Path::new(path))?;
        let mut rng = StdRng::seed_from_u64(5);

        let first = get_or_generate(
            32,
            64,
            GraphStrategy::BarabasiAlbert,
            LabelStrategyName::None,
            &[],
            &[],
            Some(&mut cache),
            &mut rng,
        )?;
        let second = get_or_generate(
            32,
            64,
            GraphStrategy::BarabasiAlbert,
            LabelStrategyName::None,
            &[],
            &[],
            Some(&mut cache),
            &mut rng,
        )?;

        // Second call is served from the cache, so the graphs are identical.
        assert_eq!(first.node_count(), second.node_count());
        assert_eq!(first.edge_count(), second.edge_count());
        Ok(())
    }

    #[test]
    fn test_generate_labeled_graph() -> Result<(), Box<dyn Error>> {
        let mut rng = StdRng::seed_from_u64(6);
        let graph = get_or_generate(
            16,
            24,
            GraphStrategy::Uniform,
            LabelStrategyName::Random,
            &["a".to_string(), "b".to_string()],
            &["x".to_string()],
            None,
            &mut rng,
        )?;
        assert_eq!(graph.node_count(), 16);
        assert!(graph.nodes().all(|(_, attrs)| !attrs.labels.is_empty()));
        Ok(())
    }
}
