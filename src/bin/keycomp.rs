use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "keycomp", version)]
struct Cli {
    /// Log pipeline details (debug level).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cut the subject out of its bright background and paste it centered over the backdrop.
    Compose(ComposeArgs),
    /// Run a compose job described by a JSON file.
    Run(RunArgs),
    /// Export the keyed subject (transparent background) as an RGBA image.
    Mask(MaskArgs),
    /// Export a box-blurred copy of an image.
    Smooth(SmoothArgs),
}

#[derive(Args, Debug)]
struct ExecArgs {
    /// Enable row-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Foreground image with a near-white background.
    #[arg(long)]
    subject: PathBuf,

    /// Base image; must be at least as large as the subject.
    #[arg(long)]
    backdrop: PathBuf,

    /// Output image path (format from extension).
    #[arg(long)]
    out: PathBuf,

    /// Smooth the backdrop with a box blur of this kernel size (1..=21).
    #[arg(long)]
    smooth: Option<u32>,

    /// Blur border handling.
    #[arg(long, value_enum, default_value_t = BorderChoice::Black)]
    border: BorderChoice,

    /// Fail when the blur kernel leaves no interior pixels.
    #[arg(long, default_value_t = false)]
    strict_degenerate_blur: bool,

    #[command(flatten)]
    exec: ExecArgs,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Subject image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path (use a format with alpha, e.g. PNG).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SmoothArgs {
    /// Image to blur.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Kernel size (1..=21).
    #[arg(long, default_value_t = keycomp::SmoothingIntensity::DEFAULT.get())]
    intensity: u32,

    /// Blur border handling.
    #[arg(long, value_enum, default_value_t = BorderChoice::Black)]
    border: BorderChoice,

    #[command(flatten)]
    exec: ExecArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BorderChoice {
    Black,
    Copy,
    Clamp,
}

impl From<BorderChoice> for keycomp::BorderMode {
    fn from(c: BorderChoice) -> Self {
        match c {
            BorderChoice::Black => keycomp::BorderMode::Black,
            BorderChoice::Copy => keycomp::BorderMode::CopySource,
            BorderChoice::Clamp => keycomp::BorderMode::ClampEdge,
        }
    }
}

impl From<&ExecArgs> for keycomp::Threading {
    fn from(a: &ExecArgs) -> Self {
        keycomp::Threading {
            parallel: a.parallel,
            threads: a.threads,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Run(args) => cmd_run(args),
        Command::Mask(args) => cmd_mask(args),
        Command::Smooth(args) => cmd_smooth(args),
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let job = keycomp::ComposeJob {
        subject: args.subject,
        backdrop: args.backdrop,
        out: args.out,
        smoothing: args.smooth.map(|intensity| keycomp::SmoothingSpec {
            intensity,
            border: args.border.into(),
        }),
        threading: (&args.exec).into(),
        strict_degenerate_blur: args.strict_degenerate_blur,
    };
    run_job(&job)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let job = keycomp::ComposeJob::from_path(&args.in_path)?;
    run_job(&job)
}

fn run_job(job: &keycomp::ComposeJob) -> anyhow::Result<()> {
    job.validate()?;

    let pipeline = keycomp::Pipeline::new(job.pipeline_opts())?;
    let mut slots = keycomp::ImageSlots::new(pipeline);
    slots.set_subject(keycomp::open_image(&job.subject)?);
    slots.set_backdrop(keycomp::open_image(&job.backdrop)?);

    let mut sink = keycomp::FileSink::new(&job.out);
    match &job.smoothing {
        Some(s) => slots.compose_smoothed(s.intensity, &mut sink)?,
        None => slots.compose(&mut sink)?,
    };

    report_written(&sink);
    Ok(())
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let subject = keycomp::open_image(&args.in_path)?;
    let cut = keycomp::key_mask(&keycomp::extract_rgb(&subject));
    write_rgba(&cut, &args.out)
}

fn cmd_smooth(args: SmoothArgs) -> anyhow::Result<()> {
    let intensity = keycomp::SmoothingIntensity::new(args.intensity)?;
    let pipeline = keycomp::Pipeline::new(keycomp::PipelineOpts {
        threading: (&args.exec).into(),
        border: args.border.into(),
        strict_degenerate_blur: false,
    })?;

    let img = keycomp::open_image(&args.in_path)?;
    let smoothed = pipeline.smooth(&img, intensity)?;
    let opaque = keycomp::RgbaGrid::from_fn(smoothed.width(), smoothed.height(), |x, y| {
        let [r, g, b] = smoothed.pixel(x, y).unwrap_or([0, 0, 0]);
        [r, g, b, 255]
    });
    write_rgba(&opaque, &args.out)
}

fn write_rgba(grid: &keycomp::RgbaGrid, out: &Path) -> anyhow::Result<()> {
    keycomp::save_rgba_grid(grid, out).with_context(|| format!("write '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn report_written(sink: &keycomp::FileSink) {
    for p in sink.written() {
        eprintln!("wrote {}", p.display());
    }
}
