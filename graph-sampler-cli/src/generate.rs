use std::error::Error;
use std::path::Path;

use clap::{value_t_or_exit, ArgMatches};
use graph_sampler_lib::caches::{Cache, GeneratedGraphParams, GraphSqliteCache};
use graph_sampler_lib::generator::labels::{label_strategy_for, LabelStrategyName};
use graph_sampler_lib::generator::{generator_for, GraphStrategy};
use graph_sampler_lib::saver::{saver_for, OutputFormat};
use graph_sampler_lib::Multigraph;
use log::info;
use rand::rngs::StdRng;

use crate::utils::{load_label_pools, output_path_from_matches, rng_from_matches};

pub fn generate(matches_generate: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let num_nodes = value_t_or_exit!(matches_generate, "num_nodes", usize);
    let num_edges = value_t_or_exit!(matches_generate, "num_edges", usize);
    let graph_strategy = value_t_or_exit!(matches_generate, "graph_strategy", GraphStrategy);
    let label_strategy = value_t_or_exit!(matches_generate, "label_strategy", LabelStrategyName);
    let output_format = value_t_or_exit!(matches_generate, "output_format", OutputFormat);

    let pools = load_label_pools(matches_generate.value_of("labels"))?;
    let mut cache = match matches_generate.value_of("sqlite_cache") {
        Some(path) => Some(GraphSqliteCache::open(Path::new(path))?),
        None => None,
    };
    let mut rng = rng_from_matches(matches_generate);

    eprintln!("Generating graph...");
    let graph = get_or_generate(
        num_nodes,
        num_edges,
        graph_strategy,
        label_strategy,
        &pools.node_labels,
        &pools.edge_labels,
        cache.as_mut(),
        &mut rng,
    )?;

    let saver = saver_for(output_format);
    let output_path = output_path_from_matches(matches_generate, saver.as_ref());
    saver.save(&graph, &output_path)?;
    eprintln!(
        "Wrote {} ({} nodes, {} edges)",
        output_path.display(),
        graph.node_count(),
        graph.edge_count()
    );

    Ok(())
}

/// Returns the cached graph for this recipe when one exists, otherwise
/// generates, labels and caches a new one.
#[allow(clippy::too_many_arguments)]
pub fn get_or_generate(
    num_nodes: usize,
    num_edges: usize,
    graph_strategy: GraphStrategy,
    label_strategy: LabelStrategyName,
    node_labels: &[String],
    edge_labels: &[String],
    mut cache: Option<&mut GraphSqliteCache>,
    rng: &mut StdRng,
) -> Result<Multigraph, Box<dyn Error>> {
    let params = GeneratedGraphParams {
        num_nodes,
        num_edges,
        graph_strategy: graph_strategy.to_string(),
        label_strategy: label_strategy.to_string(),
    };

    if let Some(cache) = cache.as_deref_mut() {
        if let Ok(graph) = cache.read(params.clone()) {
            info!("Graph found in the cache");
            return Ok(graph);
        }
    }

    let generator = generator_for(graph_strategy, num_nodes, num_edges)?;
    let mut graph = generator.generate(rng)?;

    let mut labeler =
        label_strategy_for(label_strategy, node_labels.to_vec(), edge_labels.to_vec())?;
    labeler.assign(&mut graph, rng)?;

    if let Some(cache) = cache {
        cache.write(params, &graph)?;
        info!("Graph written to the cache");
    }

    Ok(graph)
}
