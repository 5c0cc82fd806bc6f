use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use simreel::{
    Colorizer, Fps, PipelineOpts, PipelineOutcome, RenderOptions, SimreelError, Toolchain,
    WorkspaceContext, run_pipeline,
};

const EXIT_FAILURE: u8 = 1;
const EXIT_ALREADY_RUNNING: u8 = 3;
const EXIT_NOTHING_TO_RENDER: u8 = 4;

#[derive(Parser, Debug)]
#[command(name = "simreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a step dataset into one MP4 (requires `npm` and `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Dataset JSON with a top-level `data` object keyed by step index.
    dataset_file: PathBuf,

    /// Node colorizer used by the renderer.
    #[arg(long, value_enum)]
    colorizer: Option<ColorizerChoice>,

    /// First step index to render.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// One past the last step index (defaults to the end of the dataset).
    #[arg(long)]
    end: Option<u64>,

    /// Steps rendered per segment.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    group: u64,

    /// Animation seconds spent on each step.
    #[arg(long, default_value_t = 1.0)]
    time_per_step: f64,

    /// Draw the heads-up display.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    hud: bool,

    /// Output frame rate.
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Renderer project directory.
    #[arg(long, default_value = ".")]
    renderer_dir: PathBuf,

    /// Scratch directory for segment videos (defaults to `<renderer-dir>/output/segments`).
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Output MP4 path.
    #[arg(long, default_value = "video.mp4")]
    out: PathBuf,

    /// Host-wide lock file (defaults to `simreel.lock` in the system temp dir).
    #[arg(long)]
    lock_file: Option<PathBuf>,

    /// Skip `npm install` in the renderer directory.
    #[arg(long)]
    skip_install: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorizerChoice {
    #[value(name = "8Bit", alias = "8bit")]
    EightBit,
    #[value(name = "File", alias = "file")]
    File,
}

impl From<ColorizerChoice> for Colorizer {
    fn from(c: ColorizerChoice) -> Self {
        match c {
            ColorizerChoice::EightBit => Colorizer::EightBit,
            ColorizerChoice::File => Colorizer::File,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Render(args) => cmd_render(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            match err.downcast_ref::<SimreelError>() {
                Some(SimreelError::AlreadyRunning(_)) => ExitCode::from(EXIT_ALREADY_RUNNING),
                _ => ExitCode::from(EXIT_FAILURE),
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SIMREEL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<ExitCode> {
    let work_dir = args
        .work_dir
        .unwrap_or_else(|| WorkspaceContext::default_work_dir(&args.renderer_dir));
    let mut workspace = WorkspaceContext::new(&args.renderer_dir, work_dir, &args.out);
    if let Some(lock_file) = args.lock_file {
        workspace = workspace.with_lock_path(lock_file);
    }

    let opts = PipelineOpts {
        start: args.start,
        end: args.end,
        group_size: args.group,
        fps: Fps::new(args.fps, 1)?,
        render: RenderOptions {
            colorizer: args.colorizer.map(Colorizer::from),
            time_per_step: args.time_per_step,
            hud: args.hud,
        },
    };
    let tools = Toolchain::system(&args.renderer_dir, !args.skip_install);

    match run_pipeline(&args.dataset_file, opts, &workspace, &tools)? {
        PipelineOutcome::Rendered {
            segments,
            steps,
            output,
        } => {
            eprintln!(
                "wrote {} ({steps} steps in {segments} segments)",
                output.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        PipelineOutcome::NothingToRender { start, end } => {
            eprintln!("nothing to render: no steps in [{start}, {end})");
            Ok(ExitCode::from(EXIT_NOTHING_TO_RENDER))
        }
    }
}
