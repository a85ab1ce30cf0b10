use clap::ArgMatches;
use graph_sampler_lib::caches::create_sqlite_cache;

pub fn create_cache(matches_cache: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let sqlite_cache_path = matches_cache.value_of("sqlite_cache");
    eprintln!("Trying to create a new SQLite database for caching...");

    create_sqlite_cache(sqlite_cache_path.unwrap())?;
    eprintln!("Created!");

    Ok(())
}
