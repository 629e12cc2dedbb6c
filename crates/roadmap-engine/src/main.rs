//! `roadmap` command-line driver.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use roadmap_engine::{
    read_tree, render_roadmap, update_status, EngineConfig, ProgressReport, UpdateRequest,
};
use roadmap_graph::LayeredLayout;
use roadmap_model::Status;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Roadmap tree JSON file")
}

fn parse_option(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

fn cli() -> Command {
    Command::new("roadmap")
        .version(roadmap_engine::VERSION)
        .about("Lay out learning roadmaps and track their progress")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("layout")
                .about("Print the positioned and routed diagram as JSON")
                .arg(input_arg())
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_parser(value_parser!(PathBuf))
                        .help("Engine config TOML"),
                )
                .arg(
                    Arg::new("option")
                        .long("option")
                        .short('o')
                        .action(ArgAction::Append)
                        .value_parser(parse_option)
                        .help("Layout option override, e.g. elk.direction=RIGHT"),
                ),
        )
        .subcommand(
            Command::new("update")
                .about("Set one node's status and print the updated tree")
                .arg(input_arg())
                .arg(
                    Arg::new("node")
                        .long("node")
                        .short('n')
                        .required(true)
                        .help("Raw id of the phase, topic, option or extra"),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .short('s')
                        .required(true)
                        .value_parser(|raw: &str| raw.parse::<Status>())
                        .help("Pending, Active, Progress, Completed or Skipped (case-insensitive)"),
                ),
        )
        .subcommand(
            Command::new("progress")
                .about("Print the progress percentage and phase summaries")
                .arg(input_arg()),
        )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{json}");
    Ok(())
}

fn input_tree(args: &ArgMatches) -> Result<roadmap_model::RoadmapTree> {
    let path = args
        .get_one::<PathBuf>("input")
        .context("--input is required")?;
    read_tree(path).with_context(|| format!("failed to read roadmap from {}", path.display()))
}

async fn layout(args: &ArgMatches) -> Result<()> {
    let tree = input_tree(args)?;
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(overrides) = args.get_many::<(String, String)>("option") {
        config.layout = config
            .layout
            .with_overrides(overrides.map(|(key, value)| (key.as_str(), value.as_str())))?;
    }

    let rendered = render_roadmap(&tree, &LayeredLayout, &config).await?;
    print_json(&rendered)
}

fn update(args: &ArgMatches) -> Result<()> {
    let tree = input_tree(args)?;
    let node = args.get_one::<String>("node").context("--node is required")?;
    let status = *args.get_one::<Status>("status").context("--status is required")?;

    let updated = update_status(UpdateRequest::new(tree, node.as_str(), status));
    info!(node = %node, %status, progress = updated.progress, "status updated");
    print_json(&updated)
}

fn progress(args: &ArgMatches) -> Result<()> {
    let tree = input_tree(args)?;
    print_json(&ProgressReport::of(&tree))
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("layout", args)) => layout(args).await,
        Some(("update", args)) => update(args),
        Some(("progress", args)) => progress(args),
        _ => Ok(()),
    }
}
