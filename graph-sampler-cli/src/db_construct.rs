use std::error::Error;
use std::path::Path;
use std::time::Instant;

use clap::{value_t_or_exit, ArgMatches};
use console::style;
use graph_sampler_lib::distributions::{distribution_from_spec, DistributionStrategy};
use graph_sampler_lib::reader::{reader_for, InputFormat};
use graph_sampler_lib::saver::{saver_for, OutputFormat};
use graph_sampler_lib::{resolve_edge_budget, DbGraph, GraphDatabase};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::utils::rng_from_matches;

pub fn db_construct(matches_db: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let graph_path = matches_db.value_of("graph_path").unwrap();
    let input_format = value_t_or_exit!(matches_db, "input_format", InputFormat);
    let db_size = value_t_or_exit!(matches_db, "db_size", usize);
    let distribution_spec = matches_db.value_of("edge_distribution").unwrap();
    let output_path = Path::new(matches_db.value_of("output_path").unwrap());
    let output_format = value_t_or_exit!(matches_db, "output_format", OutputFormat);
    let num_landmarks = value_t_or_exit!(matches_db, "landmarks", usize);
    let progress = matches_db.is_present("progress");

    let mut rng = rng_from_matches(matches_db);
    let mut distribution =
        distribution_from_spec(distribution_spec, StdRng::seed_from_u64(rng.gen()))?;
    let reader = reader_for(input_format);
    let saver = saver_for(output_format);

    let get_progress_bar = |n: u64| {
        if progress {
            ProgressBar::new(n)
        } else {
            ProgressBar::hidden()
        }
    };
    let get_progress_style = || {
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:20.cyan/blue} {pos:>7}/{len:7} {msg}")
            .progress_chars("##-")
    };

    eprintln!("{}", style("Reading main graph...").bold());
    let now = Instant::now();
    let graph = reader.read(Path::new(graph_path))?;
    eprintln!(
        "Read {} nodes and {} edges in {:.2} s",
        graph.node_count(),
        graph.edge_count(),
        now.elapsed().as_secs_f32()
    );

    eprintln!(
        "{}",
        style(format!("Finding {} starting nodes...", db_size)).bold()
    );
    let now = Instant::now();
    let starting_nodes = graph.extract_k_distant_nodes(db_size, num_landmarks, &mut rng)?;
    info!(
        "Selected {} starting nodes in {:.2} s",
        starting_nodes.len(),
        now.elapsed().as_secs_f32()
    );
    debug!("Starting nodes: {}", starting_nodes.iter().join(", "));

    let max_edges = graph.edge_count();
    let mut stats_db = GraphDatabase::new();

    let pb = get_progress_bar(starting_nodes.len() as u64);
    pb.set_style(get_progress_style());
    pb.set_message("Extracting subgraphs...");

    for (i, &node) in starting_nodes.iter().enumerate() {
        let num_edges = resolve_edge_budget(distribution.next(), max_edges);
        let subgraph = graph.extract_subgraph_by_edge_count(node, num_edges)?;
        info!(
            "Extracted subgraph {}/{}: {} nodes, {} edges",
            i + 1,
            starting_nodes.len(),
            subgraph.node_count(),
            subgraph.edge_count()
        );

        let db_graph = DbGraph::new(i.to_string(), subgraph);
        if matches_db.is_present("print_stats") {
            stats_db.add_graph(db_graph.clone());
        }

        // First batch truncates any stale file, later batches append.
        let batch = GraphDatabase::from_graphs(vec![db_graph]);
        saver.save_db(&batch, output_path, i > 0)?;
        pb.inc(1);
    }
    pb.finish_with_message("Extracting subgraphs done!");

    if matches_db.is_present("print_stats") {
        eprintln!("{}", style("Database statistics").bold());
        eprintln!("{}", stats_db.stats());
    }

    eprintln!("Wrote {}", output_path.display());

    Ok(())
}
