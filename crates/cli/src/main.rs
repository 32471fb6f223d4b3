#![deny(unsafe_code)]
//! CLI binary for the force-fields vector field visualizer.
//!
//! Subcommands:
//! - `run` (default): open the interactive window
//! - `render`: run headless for N frames and write a PNG snapshot
//! - `list`: print available field kinds and key bindings

mod error;
mod window;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use force_fields_core::{FieldKind, SimConfig, Simulation, Vec2};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const KEY_BINDINGS: &[(&str, &str)] = &[
    ("Space", "cycle to the next field"),
    ("G", "toggle the arrow grid"),
    ("P", "toggle particles"),
    ("Left mouse", "emit particles at the pointer"),
    ("Escape", "quit"),
];

#[derive(Parser)]
#[command(name = "force-fields", about = "Interactive 2D vector field visualizer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive window.
    Run {
        #[command(flatten)]
        settings: ConfigArgs,
    },
    /// Run the simulation headless for N frames and write a PNG snapshot.
    Render {
        #[command(flatten)]
        settings: ConfigArgs,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// Fixed time step per frame, in seconds.
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// Hold the pointer down at "x,y" (screen pixels) on every frame.
        #[arg(long, value_parser = parse_point)]
        hold: Option<Vec2>,

        /// Output file path.
        #[arg(short, long, default_value = "force-fields.png")]
        output: PathBuf,
    },
    /// List available field kinds and key bindings.
    List,
}

/// Configuration sources shared by `run` and `render`. Flags override the
/// config file, which overrides the built-in defaults.
#[derive(Args, Default)]
struct ConfigArgs {
    /// JSON config file; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid rows.
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns.
    #[arg(long)]
    cols: Option<usize>,

    /// Initial field (uniform, radial, vortex, spiral, saddle).
    #[arg(long)]
    field: Option<String>,

    /// PRNG seed for particle spawns.
    #[arg(long)]
    seed: Option<u64>,

    /// Particle pool capacity.
    #[arg(long)]
    max_particles: Option<usize>,
}

impl ConfigArgs {
    fn load(&self) -> Result<SimConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
                SimConfig::from_json(&text)?
            }
            None => SimConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(name) = &self.field {
            config.field = FieldKind::from_name(name)?;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(max_particles) = self.max_particles {
            config.max_particles = max_particles;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid coordinate {v:?}: {e}"))
    };
    Ok(Vec2::new(parse(x)?, parse(y)?))
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let command = cli.command.unwrap_or(Command::Run {
        settings: ConfigArgs::default(),
    });

    match command {
        Command::List => {
            let fields = FieldKind::list_names();
            if cli.json {
                let keys: serde_json::Map<String, serde_json::Value> = KEY_BINDINGS
                    .iter()
                    .map(|(key, action)| (key.to_string(), (*action).into()))
                    .collect();
                let info = serde_json::json!({
                    "fields": fields,
                    "keys": keys,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Fields:");
                for kind in FieldKind::ALL {
                    println!("  {:<8} {}", kind.slug(), kind.name());
                }
                println!("Keys:");
                for (key, action) in KEY_BINDINGS {
                    println!("  {key:<11} {action}");
                }
            }
        }
        Command::Run { settings } => {
            let sim = Simulation::new(settings.load()?)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&sim.status())?);
            }
            window::run(sim);
        }
        Command::Render {
            settings,
            frames,
            dt,
            hold,
            output,
        } => {
            if !(dt.is_finite() && dt >= 0.0) {
                return Err(CliError::Input(format!("--dt must be non-negative, got {dt}")));
            }
            let mut sim = Simulation::new(settings.load()?)?;
            force_fields_raster::advance(&mut sim, frames, dt, hold);
            let canvas = force_fields_raster::render_frame(&sim)?;
            force_fields_raster::snapshot::write_png(&canvas, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "frames": frames,
                    "dt": dt,
                    "seed": sim.config().seed,
                    "width": canvas.width(),
                    "height": canvas.height(),
                    "output": output.display().to_string(),
                    "status": sim.status(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, {frames} frames, {} particles) -> {}",
                    sim.field_kind(),
                    canvas.width(),
                    canvas.height(),
                    sim.pool().active_count(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
