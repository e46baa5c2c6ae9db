use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use latent_loop::{ControlParameters, LoopConfig, assemble_planes, generate};

#[derive(Parser, Debug)]
#[command(name = "latent-loop", version)]
struct Cli {
    /// Optional JSON config (contract, calibration, player options).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the latent trajectory for a pair of control values as JSON.
    Trajectory(TrajectoryArgs),
    /// Convert a raw planar decoder dump (little-endian f32) into a PNG.
    Frame(FrameArgs),
    /// Print the effective configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct TrajectoryArgs {
    /// Time phase control, 1..=100.
    #[arg(long, default_value_t = 63)]
    time: u8,

    /// Amplitude control, 1..=100.
    #[arg(long, default_value_t = 14)]
    amplitude: u8,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Raw decoder output: 3 * width * height little-endian f32 values, channel-planar.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => LoopConfig::from_path(path)?,
        None => LoopConfig::default(),
    };
    match cli.cmd {
        Command::Trajectory(args) => cmd_trajectory(&config, args),
        Command::Frame(args) => cmd_frame(&config, args),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("LATENT_LOOP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_trajectory(config: &LoopConfig, args: TrajectoryArgs) -> anyhow::Result<()> {
    let params = ControlParameters::new(args.time, args.amplitude)?;
    let traj = generate(params, &config.calibration)?;
    println!("{}", serde_json::to_string_pretty(traj.points())?);
    Ok(())
}

fn cmd_frame(config: &LoopConfig, args: FrameArgs) -> anyhow::Result<()> {
    let planes = read_f32le(&args.in_path)?;
    let frame = assemble_planes(config.contract.canvas, planes)
        .with_context(|| format!("assemble '{}'", args.in_path.display()))?;
    frame.save_png(&args.out)?;
    tracing::info!(out = %args.out.display(), "wrote frame");
    Ok(())
}

fn read_f32le(path: &Path) -> anyhow::Result<Vec<f32>> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    anyhow::ensure!(
        bytes.len() % 4 == 0,
        "'{}' is {} bytes, not a whole number of f32 values",
        path.display(),
        bytes.len()
    );
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}
