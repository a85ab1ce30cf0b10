use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use graph_sampler_lib::saver::{resolve_output_path, GraphSaver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

/// Builds the run's RNG from the optional `--seed` option.
pub fn rng_from_matches(matches: &ArgMatches) -> StdRng {
    match matches.value_of("seed") {
        Some(seed) => {
            let seed: u64 = seed.parse().expect("Seed has to be an unsigned integer");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Label pools as supplied on disk.
#[derive(Debug, Deserialize)]
pub struct LabelPoolsFile {
    #[serde(default)]
    pub node_labels: Vec<String>,
    #[serde(default)]
    pub edge_labels: Vec<String>,
}

/// Reads the labels JSON file. A missing path yields empty pools, which only
/// the `none` strategy accepts.
pub fn load_label_pools(path: Option<&str>) -> Result<LabelPoolsFile, Box<dyn Error>> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            let pools = serde_json::from_reader(file)?;
            Ok(pools)
        }
        None => Ok(LabelPoolsFile {
            node_labels: vec![],
            edge_labels: vec![],
        }),
    }
}

/// Output path for single-graph commands: `-o` when given, `output.<ext>`
/// in the working directory otherwise.
pub fn output_path_from_matches(matches: &ArgMatches, saver: &dyn GraphSaver) -> PathBuf {
    let given = Path::new(matches.value_of("output_path").unwrap_or("output"));
    resolve_output_path(given, saver.format_extension())
}
