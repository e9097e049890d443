use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "newsreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a narrated video (requires `ffmpeg` on PATH).
    Run(RunArgs),
    /// Print the narration script without generating any media.
    Script(ScriptArgs),
    /// Check that the configured encoder can be found.
    Doctor(ConfigArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON configuration file. Missing fields use built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Directory for the audio, image and video artifacts.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Topic to narrate instead of the live feed. Repeat for several stories.
    #[arg(long = "topic")]
    topics: Vec<String>,
}

#[derive(Args, Debug)]
struct ScriptArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Topic to narrate instead of the live feed. Repeat for several stories.
    #[arg(long = "topic")]
    topics: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Script(args) => cmd_script(args),
        Command::Doctor(args) => cmd_doctor(args),
    }
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<newsreel::NewsreelConfig> {
    let cfg = match &args.config {
        Some(path) => newsreel::NewsreelConfig::from_json_file(path)?,
        None => newsreel::NewsreelConfig::default(),
    };
    Ok(cfg)
}

/// CLI topics win over the configured list.
fn pick_topics(cli: Vec<String>, cfg: &newsreel::NewsreelConfig) -> Vec<String> {
    if cli.is_empty() {
        cfg.topics.clone()
    } else {
        cli
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.config)?;
    if let Some(dir) = args.out_dir {
        cfg.output_dir = dir;
    }
    let topics = pick_topics(args.topics, &cfg);

    let pipeline = newsreel::Pipeline::from_config(&cfg);
    let video = pipeline.run(&topics)?;

    println!("Video generated at: {}", video.display());
    Ok(())
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let topics = pick_topics(args.topics, &cfg);

    let pipeline = newsreel::Pipeline::from_config(&cfg);
    println!("{}", pipeline.script(&topics));
    Ok(())
}

fn cmd_doctor(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let muxer = newsreel::FfmpegMuxer::new(cfg.encoder.program);
    let program = muxer.program();
    if newsreel::is_program_on_path(program) {
        eprintln!("encoder: '{program}' found");
        Ok(())
    } else {
        Err(newsreel::NewsreelError::dependency_missing(program).into())
    }
}
