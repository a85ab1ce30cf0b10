use std::error::Error;
use std::path::Path;

use clap::{value_t_or_exit, ArgMatches};
use graph_sampler_lib::reader::{reader_for, InputFormat};
use graph_sampler_lib::reify::{reify_strategy_for, ReifyStrategyName};
use graph_sampler_lib::saver::{saver_for, OutputFormat};
use graph_sampler_lib::GraphDatabase;
use log::info;

pub fn reify_db(matches_reify: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let input_path = matches_reify.value_of("input_path").unwrap();
    let input_format = value_t_or_exit!(matches_reify, "input_format", InputFormat);
    let output_path = Path::new(matches_reify.value_of("output_path").unwrap());
    let output_format = value_t_or_exit!(matches_reify, "output_format", OutputFormat);
    let strategy_name = value_t_or_exit!(matches_reify, "strategy", ReifyStrategyName);

    let reader = reader_for(input_format);
    let saver = saver_for(output_format);
    let strategy = reify_strategy_for(strategy_name);

    let db = reader.read_db(Path::new(input_path))?;
    let mut reified_db = GraphDatabase::new();
    for entry in db.graphs() {
        info!("Reifying graph {}", entry.graph_id);
        reified_db.add_graph(strategy.reify(entry)?);
    }

    saver.save_db(&reified_db, output_path, false)?;
    eprintln!("Wrote {}", output_path.display());

    Ok(())
}
