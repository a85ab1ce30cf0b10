use clap::{
    App,
    AppSettings::ArgRequiredElseHelp,
    Arg, SubCommand,
};
use indoc::indoc;

pub fn build_cli() -> App<'static, 'static> {
    let subcommand_convert = get_subcommand_convert();
    let subcommand_generate = get_subcommand_generate();
    let subcommand_db_construct = get_subcommand_db_construct();
    let subcommand_sub_database = get_subcommand_sub_database();
    let subcommand_reify_db = get_subcommand_reify_db();
    let subcommand_alter_db = get_subcommand_alter_db();
    let subcommand_create_cache = get_subcommand_create_sql_cache();

    App::new("Graph sampler")
        .version("0.2.0")
        .setting(ArgRequiredElseHelp)
        .subcommands([
            subcommand_convert,
            subcommand_generate,
            subcommand_db_construct,
            subcommand_sub_database,
            subcommand_reify_db,
            subcommand_alter_db,
            subcommand_create_cache,
        ])
        .about("Generates, samples and rewrites labeled multigraph databases")
        .long_about(indoc! {"
        Generates, samples and rewrites labeled multigraph databases.

        A database is an ordered collection of graphs. The main workflow reads one
        large graph, picks mutually distant starting nodes on it and extracts one
        edge-bounded subgraph around each, writing the results out as a database.
        "})
}

fn arg_seed() -> Arg<'static, 'static> {
    Arg::with_name("seed")
        .help("Seed for the random number generator")
        .long_help(indoc! {"
            Seed for the random number generator.

            Runs with the same seed and the same inputs produce the same output.
            Without this option every run draws a fresh seed.
        "})
        .long("seed")
        .takes_value(true)
        .value_name("seed")
}

fn arg_input_format() -> Arg<'static, 'static> {
    Arg::with_name("input_format")
        .help("Source format (data or csv)")
        .required(true)
}

fn arg_output_format() -> Arg<'static, 'static> {
    Arg::with_name("output_format")
        .help("Destination format (data)")
        .required(true)
}

fn get_subcommand_convert() -> App<'static, 'static> {
    let input_path = Arg::with_name("input_path")
        .index(1)
        .help("Path to the source file")
        .required(true);
    let input_format = arg_input_format().index(2);
    let output_format = arg_output_format().index(3);
    let output_path = Arg::with_name("output_path")
        .help("Path to the output file")
        .long_help(indoc! {"
            Path to the output file.

            When omitted, the graph is written to output.<ext> in the working
            directory, where <ext> matches the destination format.
        "})
        .short("o")
        .long("output")
        .takes_value(true)
        .value_name("path");

    SubCommand::with_name("convert")
        .about("Reads a graph and writes it out in a different format")
        .args(&[input_path, input_format, output_format, output_path])
}

fn get_subcommand_generate() -> App<'static, 'static> {
    let num_nodes = Arg::with_name("num_nodes")
        .index(1)
        .help("Number of nodes in the generated graph")
        .required(true);
    let num_edges = Arg::with_name("num_edges")
        .index(2)
        .help("Number of edges in the generated graph")
        .required(true);
    let graph_strategy = Arg::with_name("graph_strategy")
        .index(3)
        .help("Graph generation strategy (barabasi-albert or uniform)")
        .required(true);
    let label_strategy = Arg::with_name("label_strategy")
        .index(4)
        .help("Label assignment strategy (none, random or community)")
        .required(true);
    let output_format = arg_output_format().index(5);
    let output_path = Arg::with_name("output_path")
        .help("Path to the output file")
        .short("o")
        .long("output")
        .takes_value(true)
        .value_name("path");
    let labels = Arg::with_name("labels")
        .help("Path to a labels JSON file")
        .long_help(indoc! {r#"
            Path to a labels JSON file.

            The file supplies the label pools for the labeling strategies:
                {"node_labels": ["a", "b"], "edge_labels": ["x"]}

            Required by the random and community strategies, ignored by none.
        "#})
        .short("l")
        .long("labels")
        .takes_value(true)
        .value_name("path");
    let sqlite_cache = Arg::with_name("sqlite_cache")
        .help("Path to an sqlite database that will be used as a cache")
        .long_help(indoc! {"
            Path to an sqlite database that will be used as a cache.

            A graph generated earlier with the same node count, edge count and
            strategies is loaded from the cache instead of being regenerated.
        "})
        .short("c")
        .long("sqlite-cache")
        .takes_value(true)
        .value_name("path");

    SubCommand::with_name("gen")
        .about("Generates a random graph and optionally labels it")
        .long_about(indoc! {"
        Generates a random graph and optionally labels it.

        The barabasi-albert strategy grows a preferential-attachment graph;
        the uniform strategy draws every edge endpoint uniformly at random.
        "})
        .args(&[
            num_nodes,
            num_edges,
            graph_strategy,
            label_strategy,
            output_format,
            output_path,
            labels,
            sqlite_cache,
            arg_seed(),
        ])
}

fn get_subcommand_db_construct() -> App<'static, 'static> {
    let graph_path = Arg::with_name("graph_path")
        .index(1)
        .help("Path to the graph file to extract graphs from")
        .required(true);
    let input_format = arg_input_format().index(2);
    let db_size = Arg::with_name("db_size")
        .index(3)
        .help("Number of graphs to store in the database")
        .required(true);
    let edge_distribution = Arg::with_name("edge_distribution")
        .index(4)
        .help("Distribution the per-graph edge budgets are drawn from")
        .long_help(indoc! {"
            Distribution the per-graph edge budgets are drawn from.

            One of:
                gaussian(mean=<f>,stddev=<f>)
                uniform(min=<f>,max=<f>)
                fixed(value=<f>)
        "})
        .required(true);
    let output_path = Arg::with_name("output_path")
        .index(5)
        .help("Path to the database file to construct")
        .required(true);
    let output_format = arg_output_format().index(6);
    let landmarks = Arg::with_name("landmarks")
        .help("Number of landmarks used by the distance sketch")
        .long("landmarks")
        .takes_value(true)
        .value_name("count")
        .default_value("20");
    let progress = Arg::with_name("progress")
        .help("Shows progress")
        .short("p")
        .long("show-progress");
    let print_stats = Arg::with_name("print_stats")
        .long("stats")
        .help("Prints summary statistics of the constructed database");

    SubCommand::with_name("db_construct")
        .about("Constructs a database of subgraphs sampled from one graph")
        .long_about(indoc! {"
        Constructs a database of subgraphs sampled from one graph.

        Starting nodes are chosen to be mutually distant using a landmark
        distance sketch. Around each starting node a breadth-first subgraph is
        extracted until its edge budget is met, and each subgraph is appended
        to the output file as soon as it is ready.
        "})
        .args(&[
            graph_path,
            input_format,
            db_size,
            edge_distribution,
            output_path,
            output_format,
            landmarks,
            progress,
            print_stats,
            arg_seed(),
        ])
}

fn get_subcommand_sub_database() -> App<'static, 'static> {
    let input_path = Arg::with_name("input_path")
        .index(1)
        .help("Path to the source database")
        .required(true);
    let input_format = arg_input_format().index(2);
    let edge_distribution = Arg::with_name("edge_distribution")
        .index(3)
        .help("Distribution the per-graph edge budgets are drawn from")
        .required(true);
    let db_size = Arg::with_name("db_size")
        .index(4)
        .help("Number of graphs to include in the sub-database")
        .required(true);
    let output_path = Arg::with_name("output_path")
        .index(5)
        .help("Path to the output file")
        .required(true);
    let output_format = arg_output_format().index(6);

    SubCommand::with_name("sub_database")
        .about("Extracts a bounded subgraph from each graph of a database")
        .long_about(indoc! {"
        Extracts a bounded subgraph from each graph of a database.

        The first db_size graphs of the source database are processed. For each,
        an edge budget is drawn from the distribution and a subgraph is extracted
        starting from the graph's first node.
        "})
        .args(&[
            input_path,
            input_format,
            edge_distribution,
            db_size,
            output_path,
            output_format,
            arg_seed(),
        ])
}

fn get_subcommand_reify_db() -> App<'static, 'static> {
    let input_path = Arg::with_name("input_path")
        .index(1)
        .help("Path to the source database")
        .required(true);
    let input_format = arg_input_format().index(2);
    let output_path = Arg::with_name("output_path")
        .index(3)
        .help("Path to the output file")
        .required(true);
    let output_format = arg_output_format().index(4);
    let strategy = Arg::with_name("strategy")
        .index(5)
        .help("Reification strategy (multi-arcs-expansion)")
        .required(true);

    SubCommand::with_name("reify_db")
        .about("Rewrites parallel-edge bundles of every graph in a database")
        .long_about(indoc! {"
        Rewrites parallel-edge bundles of every graph in a database.

        multi-arcs-expansion keeps single arcs as they are and replaces each
        bundle of parallel arcs with one fresh node per arc, connected to the
        bundle's endpoints by source and target marker edges.
        "})
        .args(&[input_path, input_format, output_path, output_format, strategy])
}

fn get_subcommand_alter_db() -> App<'static, 'static> {
    let input_path = Arg::with_name("input_path")
        .index(1)
        .help("Path to the source database")
        .required(true);
    let input_format = arg_input_format().index(2);
    let output_path = Arg::with_name("output_path")
        .index(3)
        .help("Path to the output file")
        .required(true);
    let output_format = arg_output_format().index(4);
    let strategy = Arg::with_name("strategy")
        .index(5)
        .help("Alteration strategy (multi-edge)")
        .required(true);

    SubCommand::with_name("alter_db")
        .about("Applies a random alteration to every graph in a database")
        .long_about(indoc! {"
        Applies a random alteration to every graph in a database.

        multi-edge duplicates a random subset of the existing edges, turning
        single arcs into parallel bundles.
        "})
        .args(&[
            input_path,
            input_format,
            output_path,
            output_format,
            strategy,
            arg_seed(),
        ])
}

fn get_subcommand_create_sql_cache() -> App<'static, 'static> {
    let sqlite_cache = Arg::with_name("sqlite_cache")
        .help("Path for the new sqlite cache database")
        .value_name("path")
        .required(true);

    SubCommand::with_name("create_cache")
        .about("Creates an empty sqlite cache database for generated graphs")
        .arg(sqlite_cache)
}
