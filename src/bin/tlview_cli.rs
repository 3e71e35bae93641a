//! CLI tool for tlview - inspects datasets and replays scroll sessions natively
//!
//! Usage:
//!   tlview_cli inspect [--dataset releases.json] [--filter OpenAI]
//!   tlview_cli layout --width 1200 --height 800 --count 25
//!   tlview_cli simulate steps.json [--width 390 --height 844]

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;

use tlview::layout::{TrackLayout, Viewport};
use tlview::viewer::FRAME_MS;
use tlview::{TimelineConfig, TlView};

/// Touch samples generated per simulated swipe.
const SWIPE_SAMPLES: u32 = 8;

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_BIN_NAME"), version, about = "Year-in-review timeline tools")]
struct Cli {
    /// Dataset JSON (defaults to the bundled 2025 releases).
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Partial options JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarise the dataset: makers and releases per month.
    Inspect {
        /// Maker to filter by.
        #[arg(long, default_value = "All")]
        filter: String,
    },
    /// Print layout parameters for a viewport and item count.
    Layout {
        #[arg(long, default_value_t = 1200.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
        #[arg(long)]
        count: usize,
    },
    /// Replay a JSON array of steps and print the snapshot after each.
    Simulate {
        /// Steps file, or `-` for stdin.
        steps: PathBuf,
        #[arg(long, default_value_t = 1200.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
    },
}

/// One simulated interaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum Step {
    /// Scroll to an absolute offset.
    Scroll(f64),
    ScrollBy(f64),
    /// Run this many animation frames.
    Tick(u32),
    /// Run frames until the engine is idle.
    Settle,
    JumpMonth(String),
    JumpModel(String),
    /// `true` for the next month, `false` for the previous one.
    StepMonth(bool),
    Filter(String),
    #[serde(rename_all = "camelCase")]
    Swipe {
        from_x: f64,
        to_x: f64,
        #[serde(default)]
        y: f64,
        duration_ms: f64,
    },
    Resize {
        width: f64,
        height: f64,
    },
}

fn read_text(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<TimelineConfig> {
    match path {
        Some(path) => {
            let text = read_text(path)?;
            TimelineConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(TimelineConfig::default()),
    }
}

fn load_viewer(cli: &Cli, width: f64, height: f64) -> Result<TlView> {
    let config = load_config(cli.config.as_deref())?;
    let dataset = cli.dataset.as_deref().map(read_text).transpose()?;
    TlView::with_options(width, height, dataset.as_deref(), config).context("building viewer")
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn inspect(cli: &Cli, filter: &str) -> Result<()> {
    let mut viewer = load_viewer(cli, 1200.0, 800.0)?;
    viewer.set_filter(filter);
    let engine = viewer.engine();
    print_json(&json!({
        "total": engine.dataset().len(),
        "filter": engine.filter().selector(),
        "filtered": engine.view().len(),
        "makers": viewer.makers(),
        "months": viewer.month_buckets(),
    }))
}

fn layout(cli: &Cli, width: f64, height: f64, count: usize) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let viewport = Viewport::new(width, height);
    let layout = TrackLayout::for_viewport(&viewport, count, &config.layout);
    let css: serde_json::Map<String, serde_json::Value> = layout
        .css_variables()
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.into()))
        .collect();
    print_json(&json!({
        "layout": layout,
        "documentHeight": layout.document_height(viewport.height),
        "cssVariables": css,
    }))
}

fn run_step(viewer: &mut TlView, clock_ms: &mut f64, step: &Step) {
    match step {
        Step::Scroll(offset) => viewer.scroll_to(*offset),
        Step::ScrollBy(delta) => viewer.scroll_by(*delta),
        Step::Tick(frames) => {
            for _ in 0..*frames {
                viewer.tick(FRAME_MS);
                *clock_ms += FRAME_MS;
            }
        }
        Step::Settle => {
            let frames = viewer.settle();
            *clock_ms += FRAME_MS * f64::from(u32::try_from(frames).unwrap_or(u32::MAX));
        }
        Step::JumpMonth(month) => {
            viewer.jump_to_month(month);
        }
        Step::JumpModel(id) => {
            viewer.jump_to_model(id);
        }
        Step::StepMonth(forward) => {
            viewer.step_month(*forward);
        }
        Step::Filter(maker) => viewer.set_filter(maker),
        Step::Swipe {
            from_x,
            to_x,
            y,
            duration_ms,
        } => {
            viewer.touch_start(*from_x, *y, *clock_ms);
            for k in 1..=SWIPE_SAMPLES {
                let t = f64::from(k) / f64::from(SWIPE_SAMPLES);
                let x = from_x + (to_x - from_x) * t;
                viewer.touch_move(x, *y, *clock_ms + duration_ms * t);
            }
            *clock_ms += duration_ms;
            viewer.touch_end();
        }
        Step::Resize { width, height } => viewer.resize(*width, *height),
    }
}

fn simulate(cli: &Cli, steps_path: &Path, width: f64, height: f64) -> Result<()> {
    let text = read_text(steps_path)?;
    let steps: Vec<Step> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", steps_path.display()))?;
    let mut viewer = load_viewer(cli, width, height)?;
    let mut clock_ms = 0.0;

    let mut frames = vec![json!({
        "step": "initial",
        "snapshot": viewer.snapshot(),
    })];
    for step in &steps {
        run_step(&mut viewer, &mut clock_ms, step);
        tracing::debug!(?step, position = viewer.scroll_position(), "step applied");
        frames.push(json!({
            "step": format!("{step:?}"),
            "scrollPosition": viewer.scroll_position(),
            "header": viewer.header_label(),
            "snapshot": viewer.snapshot(),
        }));
    }
    print_json(&serde_json::Value::Array(frames))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr) // stdout carries the JSON
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Inspect { filter } => inspect(&cli, filter),
        Command::Layout {
            width,
            height,
            count,
        } => layout(&cli, *width, *height, *count),
        Command::Simulate {
            steps,
            width,
            height,
        } => simulate(&cli, steps, *width, *height),
    }
}
