use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use skillmap_core::{CourseNode, LayoutConfig, LayoutDirection, NodeId, TieBreakKind};
use skillmap_graph::{
    CurvatureAssigner, GraphAdapter, HierarchicalLayouter, LayoutEdge, LayoutKind, LayoutNode,
    Layouter, LinearLayouter, RelationshipSemantics, Sequencer, apply_curvature, apply_layout,
    load_flow_document, load_graph_document, load_layout_config, reorder_by_flow, tie_break_for,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Order and lay out skill graphs", long_about = None)]
struct Args {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a study sequence for a graph document
    Sequence {
        path: PathBuf,

        #[arg(long, default_value = "numeric-id")]
        tie_break: TieBreakKind,
    },
    /// Compute ranks, coordinates and edge curvature for a graph document
    Layout {
        path: PathBuf,

        /// Place the sequence on a single line instead of in tiers
        #[arg(long)]
        linear: bool,

        /// JSON layout config; flags below override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        direction: Option<LayoutDirection>,

        #[arg(long)]
        vertical_spacing: Option<f32>,

        #[arg(long)]
        horizontal_spacing: Option<f32>,

        #[arg(long)]
        tie_break: Option<TieBreakKind>,
    },
    /// Reorder a study flow so every connection points forward
    Reorder { path: PathBuf },
}

#[derive(Serialize)]
struct SequenceOutput {
    order: Vec<NodeId>,
    ranks: Vec<u32>,
    unresolved: Vec<NodeId>,
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    kind: LayoutKind,
    direction: LayoutDirection,
    layers: Vec<Vec<NodeId>>,
    unresolved: Vec<NodeId>,
    nodes: &'a [LayoutNode],
    edges: &'a [LayoutEdge],
}

#[derive(Serialize)]
struct ReorderOutput {
    nodes: Vec<CourseNode>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn run_sequence(path: PathBuf, tie_break: TieBreakKind) -> Result<()> {
    let document = load_graph_document(&path)
        .with_context(|| format!("Failed to load graph document {:?}", path))?;
    let model = document.into_model();

    let semantics = RelationshipSemantics::new();
    let rule = tie_break_for(tie_break);
    let sequence = Sequencer::new(&semantics, rule.as_ref()).run(&model);

    print_json(&SequenceOutput {
        unresolved: sequence.unresolved().to_vec(),
        order: sequence.order,
        ranks: sequence.ranks,
    })
}

struct LayoutOverrides {
    direction: Option<LayoutDirection>,
    vertical_spacing: Option<f32>,
    horizontal_spacing: Option<f32>,
    tie_break: Option<TieBreakKind>,
}

fn resolve_config(path: Option<PathBuf>, overrides: LayoutOverrides) -> Result<LayoutConfig> {
    let mut config = match path {
        Some(path) => load_layout_config(&path)
            .with_context(|| format!("Failed to load layout config {:?}", path))?,
        None => LayoutConfig::default(),
    };

    if let Some(direction) = overrides.direction {
        config.direction = direction;
    }
    if let Some(spacing) = overrides.vertical_spacing {
        config.vertical_spacing = spacing;
    }
    if let Some(spacing) = overrides.horizontal_spacing {
        config.horizontal_spacing = spacing;
    }
    if let Some(tie_break) = overrides.tie_break {
        config.tie_break = tie_break;
    }

    config.validate().context("Invalid layout settings")?;
    Ok(config)
}

fn run_layout(path: PathBuf, linear: bool, config: LayoutConfig) -> Result<()> {
    let document = load_graph_document(&path)
        .with_context(|| format!("Failed to load graph document {:?}", path))?;
    let mut model = document.into_model();

    let result = if linear {
        LinearLayouter::new(config.clone()).execute(&model)
    } else {
        HierarchicalLayouter::new(config.clone()).execute(&model)
    };
    let renders = CurvatureAssigner::for_layout(&config, result.kind).assign_for_graph(&model, &result);

    let placed = apply_layout(&mut model, &result);
    let styled = apply_curvature(&mut model, &renders);
    tracing::info!(
        "Placed {} nodes in {} tiers, styled {} of {} edges",
        placed,
        result.layers.len(),
        styled,
        model.edges().count()
    );

    print_json(&LayoutOutput {
        kind: result.kind,
        direction: result.direction,
        layers: result.layers.clone(),
        unresolved: result.unresolved.clone(),
        nodes: model.layout_nodes(),
        edges: model.layout_edges(),
    })
}

fn run_reorder(path: PathBuf) -> Result<()> {
    let document = load_flow_document(&path)
        .with_context(|| format!("Failed to load flow document {:?}", path))?;
    let nodes = reorder_by_flow(&document.nodes, &document.edges);
    print_json(&ReorderOutput { nodes })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Sequence { path, tie_break } => run_sequence(path, tie_break),
        Command::Layout {
            path,
            linear,
            config,
            direction,
            vertical_spacing,
            horizontal_spacing,
            tie_break,
        } => {
            let config = resolve_config(
                config,
                LayoutOverrides {
                    direction,
                    vertical_spacing,
                    horizontal_spacing,
                    tie_break,
                },
            )?;
            run_layout(path, linear, config)
        }
        Command::Reorder { path } => run_reorder(path),
    }
}
