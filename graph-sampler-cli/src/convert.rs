use clap::{value_t_or_exit, ArgMatches};
use graph_sampler_lib::reader::{reader_for, InputFormat};
use graph_sampler_lib::saver::{saver_for, OutputFormat};
use log::info;
use std::path::Path;

use crate::utils::output_path_from_matches;

pub fn convert(matches_convert: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let input_path = matches_convert.value_of("input_path").unwrap();
    let input_format = value_t_or_exit!(matches_convert, "input_format", InputFormat);
    let output_format = value_t_or_exit!(matches_convert, "output_format", OutputFormat);

    let reader = reader_for(input_format);
    let saver = saver_for(output_format);
    let output_path = output_path_from_matches(matches_convert, saver.as_ref());

    let graph = reader.read(Path::new(input_path))?;
    info!(
        "Read {} nodes and {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        input_path
    );
    saver.save(&graph, &output_path)?;
    eprintln!("Wrote {}", output_path.display());

    Ok(())
}
