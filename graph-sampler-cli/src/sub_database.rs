use std::error::Error;
use std::path::Path;

use clap::{value_t_or_exit, ArgMatches};
use graph_sampler_lib::distributions::{distribution_from_spec, DistributionStrategy};
use graph_sampler_lib::reader::{reader_for, InputFormat};
use graph_sampler_lib::saver::{saver_for, OutputFormat};
use graph_sampler_lib::{resolve_edge_budget, DbGraph, GraphDatabase, GraphError};
use log::info;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::utils::rng_from_matches;

pub fn sub_database(matches_sub: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let input_path = matches_sub.value_of("input_path").unwrap();
    let input_format = value_t_or_exit!(matches_sub, "input_format", InputFormat);
    let distribution_spec = matches_sub.value_of("edge_distribution").unwrap();
    let db_size = value_t_or_exit!(matches_sub, "db_size", usize);
    let output_path = Path::new(matches_sub.value_of("output_path").unwrap());
    let output_format = value_t_or_exit!(matches_sub, "output_format", OutputFormat);

    let mut rng = rng_from_matches(matches_sub);
    let mut distribution =
        distribution_from_spec(distribution_spec, StdRng::seed_from_u64(rng.gen()))?;
    let reader = reader_for(input_format);
    let saver = saver_for(output_format);

    let db = reader.read_db(Path::new(input_path))?;
    if db_size > db.len() {
        return Err(Box::new(GraphError::InvalidParameter(format!(
            "requested sub-database size {} exceeds original database size {}",
            db_size,
            db.len()
        ))));
    }

    let mut sub_db = GraphDatabase::new();
    for entry in &db.graphs()[..db_size] {
        let num_edges = resolve_edge_budget(distribution.next(), entry.graph.edge_count());
        let start = match entry.graph.node_ids().next() {
            Some(id) => id,
            None => {
                info!("Graph {} is empty, copying it as-is", entry.graph_id);
                sub_db.add_graph(entry.clone());
                continue;
            }
        };
        let subgraph = entry.graph.extract_subgraph_by_edge_count(start, num_edges)?;
        info!(
            "Extracted subgraph of graph {}: {} nodes, {} edges",
            entry.graph_id,
            subgraph.node_count(),
            subgraph.edge_count()
        );
        sub_db.add_graph(DbGraph::new(entry.graph_id.clone(), subgraph));
    }

    saver.save_db(&sub_db, output_path, false)?;
    eprintln!("Wrote {}", output_path.display());

    Ok(())
}
