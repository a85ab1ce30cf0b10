use std::error::Error;
use std::path::Path;

use clap::{value_t_or_exit, ArgMatches};
use graph_sampler_lib::alter::{alter_strategy_for, AlterOption};
use graph_sampler_lib::reader::{reader_for, InputFormat};
use graph_sampler_lib::saver::{saver_for, OutputFormat};
use graph_sampler_lib::GraphDatabase;
use log::info;

use crate::utils::rng_from_matches;

pub fn alter_db(matches_alter: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let input_path = matches_alter.value_of("input_path").unwrap();
    let input_format = value_t_or_exit!(matches_alter, "input_format", InputFormat);
    let output_path = Path::new(matches_alter.value_of("output_path").unwrap());
    let output_format = value_t_or_exit!(matches_alter, "output_format", OutputFormat);
    let option = value_t_or_exit!(matches_alter, "strategy", AlterOption);

    let mut rng = rng_from_matches(matches_alter);
    let reader = reader_for(input_format);
    let saver = saver_for(output_format);
    let strategy = alter_strategy_for(option)?;

    let db = reader.read_db(Path::new(input_path))?;
    let mut altered_db = GraphDatabase::new();
    for entry in db.graphs() {
        info!("Altering graph {}", entry.graph_id);
        let altered = strategy.alter(entry, &mut rng)?;
        eprintln!("{}", strategy.what_changed(entry, &altered));
        altered_db.add_graph(altered);
    }

    saver.save_db(&altered_db, output_path, false)?;
    eprintln!("Wrote {}", output_path.display());

    Ok(())
}
