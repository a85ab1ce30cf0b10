pub mod alter_db;
pub mod app;
pub mod convert;
pub mod create_cache;
pub mod db_construct;
pub mod generate;
pub mod reify_db;
pub mod sub_database;
pub mod utils;

use crate::alter_db::alter_db;
use crate::convert::convert;
use crate::create_cache::create_cache;
use crate::db_construct::db_construct;
use crate::generate::generate;
use crate::reify_db::reify_db;
use crate::sub_database::sub_database;
use std::error::Error;

pub fn run_subcommand(matches: clap::ArgMatches) -> Result<(), Box<dyn Error>> {
    Ok(match matches.subcommand() {
        ("convert", Some(sub_m)) => convert(sub_m)?,
        ("gen", Some(sub_m)) => generate(sub_m)?,
        ("db_construct", Some(sub_m)) => db_construct(sub_m)?,
        ("sub_database", Some(sub_m)) => sub_database(sub_m)?,
        ("reify_db", Some(sub_m)) => reify_db(sub_m)?,
        ("alter_db", Some(sub_m)) => alter_db(sub_m)?,
        ("create_cache", Some(sub_m)) => create_cache(sub_m)?,
        (_, _) => unreachable!(),
    })
}
