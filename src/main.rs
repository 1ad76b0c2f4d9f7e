use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;
use tracing::{debug, info, Level};

use scrivener::formatting::Identity;
use scrivener::language::{self, Document};
use scrivener::mapping::{to_absolute, RangeMap, SourceMapComputer};
use scrivener::rendering::{self, Terminal};
use scrivener::writing::{Options, Writer};

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let config = Arg::new("config")
        .long("config")
        .value_name("FILE")
        .help("JSON file with layout settings (indent, newline) and the statement terminator.");

    let matches = Command::new("scrivener")
        .version(VERSION)
        .propagate_version(true)
        .author("Andrew Cowie")
        .about("Write Solidity syntax trees back out as source, with source maps.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log progress to standard error. Repeat for more detail."),
        )
        .subcommand(
            Command::new("format")
                .about("Write out the given tree as Solidity source")
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
                )
                .arg(config.clone())
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the JSON form of the tree you want to write."),
                ),
        )
        .subcommand(
            Command::new("map")
                .about("Print the source location of every node in the written output")
                .arg(
                    Arg::new("live")
                        .long("live")
                        .action(ArgAction::SetTrue)
                        .help("Record locations while writing instead of reconstructing them from each node's fragment."),
                )
                .arg(
                    Arg::new("source-index")
                        .long("source-index")
                        .value_name("INDEX")
                        .value_parser(clap::value_parser!(usize))
                        .help("Source index to report in each location; -1 is reported if omitted."),
                )
                .arg(config)
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the JSON form of the tree you want to map."),
                ),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match matches.subcommand() {
        Some(("format", submatches)) => format(submatches),
        Some(("map", submatches)) => map(submatches),
        Some(_) => Err("No valid subcommand was used".to_string()),
        None => {
            println!("usage: scrivener [COMMAND] ...");
            println!("Try '--help' for more information.");
            Ok(())
        }
    };

    if let Err(problem) = result {
        eprintln!("{}: {}", "error".bright_red(), problem);
        std::process::exit(1);
    }
}

fn setup(submatches: &ArgMatches) -> Result<(Document, Options), String> {
    let options = match submatches.get_one::<String>("config") {
        Some(filename) => {
            let filename = Path::new(filename);
            Options::load(filename)
                .map_err(|error| format!("{}: {}", filename.display(), error))?
        }
        None => Options::default(),
    };
    debug!(?options);

    // required argument, so always present
    let filename = submatches
        .get_one::<String>("filename")
        .ok_or("Missing filename")?;
    let filename = Path::new(filename);

    info!("Loading tree: {}", filename.display());
    let document =
        language::load(filename).map_err(|error| format!("{}: {}", filename.display(), error))?;

    Ok((document, options))
}

fn format(submatches: &ArgMatches) -> Result<(), String> {
    let (document, options) = setup(submatches)?;
    let writer = Writer::standard(options);

    let raw = submatches.get_flag("raw-control-chars");

    let result = if raw
        || std::io::stdout()
            .is_terminal()
    {
        rendering::render(&Terminal, &writer, &document.tree, document.root)
    } else {
        rendering::render(&Identity, &writer, &document.tree, document.root)
    };

    let output = result.map_err(|error| error.to_string())?;
    println!("{}", output);
    Ok(())
}

fn map(submatches: &ArgMatches) -> Result<(), String> {
    let (document, options) = setup(submatches)?;
    let source = submatches
        .get_one::<usize>("source-index")
        .copied();

    let tree = &document.tree;
    let root = document.root;
    let computer = SourceMapComputer::new(options.terminator);
    let writer = Writer::standard(options);

    let ranges = if submatches.get_flag("live") {
        let mut relative = RangeMap::new();
        writer
            .render_tracked(tree, root, &mut relative)
            .map_err(|error| error.to_string())?;
        to_absolute(tree, root, &relative).map_err(|error| error.to_string())?
    } else {
        let fragments = writer
            .fragments(tree, root)
            .map_err(|error| error.to_string())?;
        computer
            .compute(tree, root, &fragments)
            .map_err(|error| error.to_string())?
    };

    for id in tree.walk(root) {
        if let (Some(range), Ok(kind)) = (ranges.get(&id), tree.kind(id)) {
            println!("{}\t{}\t{}", range.location(source), kind, id);
        }
    }

    Ok(())
}
