use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "scuderia", version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a script and write one JSON frame per line.
    Simulate(SimulateArgs),
    /// Print the derived properties for a single scroll position.
    Sample(SampleArgs),
    /// Print a full launch run, one line per frame, until the car is idle again.
    Launch(LaunchArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input profile JSON. Defaults to the built-in site profile.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Script JSON with timed scroll, resize, launch and contact events.
    #[arg(long)]
    script: PathBuf,

    /// Output JSON Lines path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input profile JSON. Defaults to the built-in site profile.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Document scroll position in pixels.
    #[arg(long, allow_negative_numbers = true)]
    scroll_y: f64,
}

#[derive(Parser, Debug)]
struct LaunchArgs {
    /// Input profile JSON. Defaults to the built-in site profile.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Frame step in milliseconds.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    step_ms: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.global)?;
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Launch(args) => cmd_launch(args),
    }
}

/// `RUST_LOG` wins over the verbosity flags.
fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = derive_level(args);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("scuderia={level}")));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("initialise tracing: {e}"))
}

fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_profile(path: Option<&Path>) -> anyhow::Result<(scuderia::Profile, PathBuf)> {
    let Some(path) = path else {
        return Ok((scuderia::Profile::site_default()?, PathBuf::from(".")));
    };
    let profile = scuderia::Profile::from_path(path)
        .with_context(|| format!("load profile '{}'", path.display()))?;
    profile.validate()?;
    let root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((profile, root))
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let (profile, assets_root) = load_profile(args.in_path.as_deref())?;
    let script = scuderia::Script::from_path(&args.script)
        .with_context(|| format!("load script '{}'", args.script.display()))?;
    let mut session = scuderia::MotionSession::new(&profile, assets_root)?;

    let stats = match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
            let mut sink = scuderia::JsonLinesSink::new(BufWriter::new(f));
            let stats = session.simulate(&script, &mut sink)?;
            eprintln!("wrote {} frames to {}", stats.frames, out.display());
            stats
        }
        None => {
            let stdout = std::io::stdout();
            let mut sink = scuderia::JsonLinesSink::new(stdout.lock());
            session.simulate(&script, &mut sink)?
        }
    };
    tracing::info!(?stats, "simulation finished");
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let (profile, assets_root) = load_profile(args.in_path.as_deref())?;
    let mut session = scuderia::MotionSession::new(&profile, assets_root)?;
    session.observe_scroll(args.scroll_y);
    let frame = session.frame(0.0);

    let out = serde_json::json!({
        "scroll_y": args.scroll_y,
        "progress": frame.progress,
        "properties": frame.properties,
    });
    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    serde_json::to_writer_pretty(&mut w, &out).context("encode sample")?;
    writeln!(w)?;
    Ok(())
}

fn cmd_launch(args: LaunchArgs) -> anyhow::Result<()> {
    if !(args.step_ms.is_finite() && args.step_ms > 0.0) {
        anyhow::bail!("--step-ms must be finite and > 0");
    }
    let (profile, _) = load_profile(args.in_path.as_deref())?;
    let mut seq = scuderia::LaunchSequence::new(profile.launch)?;
    seq.start(0.0)?;

    let total_ms = profile.launch.duration_ms + profile.launch.cooldown_ms;
    let max_steps = (total_ms / args.step_ms).ceil() as u64 + 2;

    let stdout = std::io::stdout();
    let mut w = BufWriter::new(stdout.lock());
    for i in 0..=max_steps {
        let now = i as f64 * args.step_ms;
        let kin = seq.tick(now);
        let line = serde_json::json!({
            "time_ms": now,
            "phase": seq.phase(),
            "kinematics": kin,
            "effects": seq.effects(),
        });
        serde_json::to_writer(&mut w, &line).context("encode launch frame")?;
        writeln!(w)?;
        if seq.start_visible() {
            break;
        }
    }
    w.flush()?;
    Ok(())
}
