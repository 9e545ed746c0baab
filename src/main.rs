mod app;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oroview::config::{Config, load_config};
use oroview::connector::load_snapshot;
use oroview::graph::Graph;

const HEADLESS_DT: f32 = 1.0 / 60.0;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON configuration file; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ontology snapshot to stream into the graph.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Seed for node placement, overriding the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Lay the snapshot out without a window and write the GraphViz export.
    #[arg(long)]
    headless: bool,

    /// Simulation steps run in headless mode.
    #[arg(long, default_value_t = 600)]
    steps: usize,

    /// GraphViz output path.
    #[arg(long)]
    export: Option<PathBuf>,

    /// -v for debug logs, -vv for trace.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.graph.seed = Some(seed);
    }
    if let Some(export) = &args.export {
        config.viewer.export_path = export.clone();
    }

    if args.headless {
        return run_headless(config, args.snapshot.as_deref(), args.steps);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size(config.viewer.window_size),
        ..Default::default()
    };
    let snapshot = args.snapshot;

    eframe::run_native(
        "oroview",
        options,
        Box::new(move |cc| Ok(Box::new(app::OroViewApp::new(cc, config, snapshot)))),
    )
    .map_err(|error| anyhow!("viewer failed: {error}"))
}

fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run_headless(config: Config, snapshot: Option<&Path>, steps: usize) -> Result<()> {
    let mut graph = Graph::new(config.graph.clone(), config.physics);
    if let Some(path) = snapshot {
        load_snapshot(path)?.apply_to(&mut graph);
    }
    info!(
        nodes = graph.nodes_count(),
        edges = graph.edges_count(),
        steps,
        "running headless layout"
    );

    for _ in 0..steps {
        graph.step(HEADLESS_DT);
    }

    let path = &config.viewer.export_path;
    let file = File::create(path)
        .with_context(|| format!("failed to create export file {}", path.display()))?;
    graph
        .write_graphviz(BufWriter::new(file))
        .with_context(|| format!("failed to write export file {}", path.display()))?;

    info!(path = %path.display(), "wrote GraphViz export");
    Ok(())
}
