//! `fable` command-line entry point

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use fable_explorer::{init_logging, Explorer, ExplorerConfig, LogFormat};
use fable_metadata::MetadataRegistry;
use fable_route::RouteMatcher;
use fable_story::StoryGroup;
use std::path::{Path, PathBuf};

fn cli() -> Command {
    let stories = Arg::new("stories")
        .long("stories")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Story manifest (JSON)");
    let metadata = Arg::new("metadata")
        .long("metadata")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Docs/tokens/icons bundle (JSON)");

    Command::new("fable")
        .version(fable_explorer::VERSION)
        .about("Fable story explorer routing core")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug-level logs"),
        )
        .subcommand(
            Command::new("resolve")
                .about("Replay URLs through an in-memory session and print the resulting state")
                .arg(stories.clone())
                .arg(metadata.clone())
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Explorer config (TOML)"),
                )
                .arg(
                    Arg::new("base")
                        .long("base")
                        .help("Deployment base path (overrides config and FABLE_BASE_PATH)"),
                )
                .arg(
                    Arg::new("urls")
                        .num_args(1..)
                        .required(true)
                        .help("Initial location, then internal paths to push in order"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check a story manifest and metadata bundle")
                .arg(stories)
                .arg(metadata),
        )
        .subcommand(Command::new("routes").about("Print the route table"))
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let format = if matches.get_flag("log-json") {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    let level = if matches.get_flag("verbose") { "debug" } else { "info" };
    init_logging(format, level)?;

    match matches.subcommand() {
        Some(("resolve", args)) => resolve(args),
        Some(("validate", args)) => validate(args),
        Some(("routes", _)) => {
            for pattern in RouteMatcher::standard().patterns() {
                println!("{:<10} {}", pattern.name().as_str(), pattern.as_str());
            }
            Ok(())
        }
        _ => unreachable!("subcommand_required"),
    }
}

fn resolve(args: &ArgMatches) -> Result<()> {
    let (groups, metadata) = load_inputs(args)?;

    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => ExplorerConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => ExplorerConfig::new(),
    }
    .with_env_overrides();
    if let Some(base) = args.get_one::<String>("base") {
        config = config.with_base_path(base.clone());
    }

    let mut urls = args.get_many::<String>("urls").unwrap_or_default();
    let initial = urls.next().map_or("/", String::as_str);

    let explorer = Explorer::in_memory(config, initial);
    explorer.store().set_stories(groups);
    explorer.store().set_metadata(metadata);
    explorer.start();

    for url in urls {
        explorer.navigate_to(url);
    }

    let report = explorer.report();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn validate(args: &ArgMatches) -> Result<()> {
    let (groups, metadata) = load_inputs(args)?;
    let issues = metadata.validate();

    let stories: usize = groups.iter().map(StoryGroup::len).sum();
    println!(
        "{} groups, {} stories, {} docs, {} tokens, {} icons",
        groups.len(),
        stories,
        metadata.docs().len(),
        metadata.tokens().len(),
        metadata.icons().len()
    );

    if issues.is_empty() {
        println!("Metadata validation passed.");
        return Ok(());
    }
    for issue in &issues {
        println!("  - {issue}");
    }
    println!("Metadata validation failed ({} issues).", issues.len());
    std::process::exit(1);
}

fn load_inputs(args: &ArgMatches) -> Result<(Vec<StoryGroup>, MetadataRegistry)> {
    let stories = required_path(args, "stories")?;
    let metadata = required_path(args, "metadata")?;

    let groups = fable_story::manifest::load(stories).with_context(|| format!("loading {}", stories.display()))?;
    let registry = MetadataRegistry::load(metadata).with_context(|| format!("loading {}", metadata.display()))?;
    Ok((groups, registry))
}

fn required_path<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a Path> {
    args.get_one::<PathBuf>(id)
        .map(PathBuf::as_path)
        .with_context(|| format!("missing --{id}"))
}
