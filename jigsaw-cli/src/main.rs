//! CLI for the jigsaw puzzle engine.
//!
//! Provides:
//! - SVG rendering of a generated (optionally solved) board
//! - JSON dumps of the render-ready board description
//! - Parallel simulated solves for tuning snap threshold and scatter radius

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jigsaw_core::{BoardView, PuzzleConfig, Session};
use log::info;

mod render;
mod simulate;

use render::{render_svg, RenderConfig};
use simulate::{simulate, SimConfig};

#[derive(Parser)]
#[command(name = "jigsaw")]
#[command(about = "Jigsaw puzzle layout generator and simulator", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("JIGSAW_BUILD_SHA"), ")"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Puzzle configuration: a JSON file and/or per-field overrides
#[derive(Args, Debug, Clone)]
struct PuzzleArgs {
    /// JSON config file (missing fields take reference values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pieces per row and column; scatter radius and snap threshold scale with piece size
    #[arg(short, long)]
    grid: Option<usize>,

    /// Piece side length
    #[arg(long)]
    piece_size: Option<f64>,

    /// Tab size as a fraction of piece size
    #[arg(long)]
    tab_ratio: Option<f64>,

    /// Maximum per-axis scatter from the correct position
    #[arg(long)]
    scatter_radius: Option<f64>,

    /// Maximum initial tilt, in degrees
    #[arg(long)]
    max_rotation: Option<f64>,

    /// Snap distance
    #[arg(long)]
    snap_threshold: Option<f64>,

    /// Layout seed
    #[arg(short, long, default_value = "0")]
    seed: u64,
}

impl PuzzleArgs {
    fn config(&self) -> Result<PuzzleConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?
            }
            None => PuzzleConfig::default(),
        };
        if self.grid.is_some() || self.piece_size.is_some() {
            let grid = self.grid.unwrap_or(config.grid_size);
            let piece_size = self.piece_size.unwrap_or(config.piece_size);
            config = PuzzleConfig { tab_ratio: config.tab_ratio, max_rotation: config.max_rotation, ..PuzzleConfig::scaled(grid, piece_size) };
        }
        if let Some(tab_ratio) = self.tab_ratio {
            config.tab_ratio = tab_ratio;
        }
        if let Some(scatter_radius) = self.scatter_radius {
            config.scatter_radius = scatter_radius;
        }
        if let Some(max_rotation) = self.max_rotation {
            config.max_rotation = max_rotation;
        }
        if let Some(snap_threshold) = self.snap_threshold {
            config.snap_threshold = snap_threshold;
        }
        config.validate()?;
        Ok(config)
    }

    fn session(&self) -> Result<Session> {
        Ok(Session::new(self.config()?, self.seed)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a generated board to SVG
    Render {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Image revealed through the pieces (href written into the SVG)
        #[arg(short, long)]
        image: Option<String>,

        /// Lock every piece first, rendering the solved board
        #[arg(long)]
        solved: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the render-ready board description as JSON
    Layout {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run simulated solves and report drag counts
    Simulate {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Number of trials (run in parallel)
        #[arg(short, long, default_value = "100")]
        trials: usize,

        /// Give up on a trial after this many drags
        #[arg(long, default_value = "1000")]
        max_drags: usize,

        /// Maximum per-axis aiming error of the simulated player
        #[arg(long, default_value = "30")]
        aim_error: f64,

        /// Include per-trial results in the output
        #[arg(long)]
        verbose: bool,
    },
}

fn write_output(output: Option<PathBuf>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}

fn solve(session: &mut Session) -> Result<()> {
    let targets: Vec<_> = session.pieces().iter().map(|p| (p.id, p.correct - p.position)).collect();
    for (id, offset) in targets {
        session.drag_end(id, offset)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { puzzle, image, solved, output } => {
            let mut session = puzzle.session()?;
            if solved {
                solve(&mut session)?;
            }
            let config = RenderConfig {
                margin: session.config().scatter_radius + session.config().tab_size() + 5.,
                image,
                ..Default::default()
            };
            let svg = render_svg(&BoardView::new(&session), &config)?;
            write_output(output, &svg)
        }
        Commands::Layout { puzzle, output } => {
            let session = puzzle.session()?;
            let json = serde_json::to_string_pretty(&BoardView::new(&session))?;
            write_output(output, &json)
        }
        Commands::Simulate { puzzle, trials, max_drags, aim_error, verbose } => {
            let config = puzzle.config()?;
            let sim = SimConfig { trials, max_drags, aim_error, seed: puzzle.seed };
            let mut summary = simulate(&config, &sim)?;
            if !verbose {
                summary.results.clear();
            }
            info!(
                "{}/{} trials solved, mean {:.1} drags",
                summary.solved, summary.trials, summary.mean_drags
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
    }
}
