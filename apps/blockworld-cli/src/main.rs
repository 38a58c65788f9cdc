use anyhow::{Context, Result};
use blockworld_common::{GameConfig, GridConfig};
use blockworld_input::{Action, Session};
use blockworld_render::{DebugTextRenderer, Direction, Frame, Projection, Renderer};
use blockworld_world::{CheckerPalette, World, is_light_cell};
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec2;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blockworld-cli", about = "Headless blockworld tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML file overriding the built-in settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Start a game session and fly the camera with held keys
    Fly {
        /// Movement keys held for the whole flight
        #[arg(long, value_enum, value_delimiter = ',')]
        hold: Vec<Key>,
        /// Flight duration in seconds
        #[arg(long, default_value = "1.0")]
        seconds: f32,
        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Mouse motion per frame in pixels, x then y
        #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
        look: Option<Vec<f32>>,
    },
    /// Build the first game frame and dump it
    Frame {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// List every draw call
        #[arg(long)]
        draws: bool,
    },
    /// Print the checkerboard floor pattern
    Grid {
        /// Cells on each side of the origin
        #[arg(
            long,
            default_value = "5",
            value_parser = clap::value_parser!(i32).range(0..=i64::from(GridConfig::MAX_HALF_EXTENT))
        )]
        half_extent: i32,
    },
    /// Load an OBJ model and report its size
    Mesh {
        /// Path to the .obj file
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Key {
    W,
    A,
    S,
    D,
    Space,
    Shift,
}

impl From<Key> for Direction {
    fn from(key: Key) -> Self {
        match key {
            Key::W => Direction::Forward,
            Key::S => Direction::Backward,
            Key::A => Direction::Left,
            Key::D => Direction::Right,
            Key::Space => Direction::Up,
            Key::Shift => Direction::Down,
        }
    }
}

/// Click Start and run `frames` updates `1 / fps` apart.
fn fly(session: &mut Session, hold: &[Key], frames: u32, fps: u32, look: Vec2) {
    let start = session.layout().start.center();
    session.handle(Action::CursorMoved(start));
    session.handle(Action::Click(start));
    for &key in hold {
        session.handle(Action::Press(key.into()));
    }

    let step = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let mut now = Instant::now();
    session.update(now);
    for _ in 0..frames {
        now += step;
        session.handle(Action::MouseMotion(look));
        if let Some(state) = session.update(now) {
            tracing::debug!(dt = state.dt, look = ?state.look, moves = state.moves, "frame");
        }
    }
}

/// `.` for light cells, `#` for dark, rows along +Z.
fn grid_pattern(half_extent: i32) -> String {
    let mut out = String::new();
    for z in -half_extent..=half_extent {
        for x in -half_extent..=half_extent {
            out.push(if is_light_cell(x, z) { '.' } else { '#' });
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = GameConfig::load_or_default(cli.config.as_deref())
        .context("load configuration")?;

    match cli.command {
        Commands::Info => {
            println!("blockworld-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("world: {}", blockworld_world::crate_info());
            println!("assets: {}", blockworld_assets::crate_info());
            println!("render: {}", blockworld_render::crate_info());
            println!("input: {}", blockworld_input::crate_info());
        }
        Commands::Fly {
            hold,
            seconds,
            fps,
            look,
        } => {
            let look = match look.as_deref() {
                Some([dx, dy]) => Vec2::new(*dx, *dy),
                _ => Vec2::ZERO,
            };
            let frames = (seconds.max(0.0) * fps as f32).round() as u32;

            let mut session = Session::from_config(&config);
            fly(&mut session, &hold, frames, fps, look);

            let camera = session.camera();
            let p = camera.position;
            let f = camera.front();
            println!("Flew {frames} frames at {fps} fps holding {hold:?}");
            println!("Position: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
            println!("Yaw: {:.2}  Pitch: {:.2}", camera.yaw(), camera.pitch());
            println!("Front: ({:.3}, {:.3}, {:.3})", f.x, f.y, f.z);
            println!("View:");
            let view = camera.view_matrix().transpose();
            for row in view.to_cols_array_2d() {
                println!(
                    "  [{:8.3} {:8.3} {:8.3} {:8.3}]",
                    row[0], row[1], row[2], row[3]
                );
            }
        }
        Commands::Frame { json, draws } => {
            let world = World::from_config(&config);
            let session = Session::from_config(&config);
            let projection = Projection::from_config(
                &config.projection,
                config.window.width,
                config.window.height,
            );
            let frame = Frame::build(session.camera(), &projection, &world, config.clear_color);

            if json {
                println!("{}", serde_json::to_string_pretty(&frame)?);
            } else {
                let renderer = DebugTextRenderer { verbose: draws };
                print!("{}", renderer.render(&frame));
            }
        }
        Commands::Grid { half_extent } => {
            let palette = CheckerPalette {
                light: config.grid.light,
                dark: config.grid.dark,
            };
            let world = World::checker_grid(half_extent, &palette);
            println!(
                "Checkerboard {0}x{0} ({1} tiles)",
                2 * half_extent + 1,
                world.tiles().len()
            );
            print!("{}", grid_pattern(half_extent));
        }
        Commands::Mesh { path } => {
            let mesh = blockworld_assets::load_obj_mesh(&path)
                .with_context(|| format!("load {}", path.display()))?;
            println!("Mesh: {}", path.display());
            println!("  vertices:  {}", mesh.vertices.len());
            println!("  indices:   {}", mesh.index_count());
            println!("  triangles: {}", mesh.triangle_count());
        }
    }

    Ok(())
}
