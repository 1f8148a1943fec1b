use std::{
    collections::VecDeque,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scrollwipe::assets::pair::load_asset;
use scrollwipe::render::backend::create_backend;
use scrollwipe::{
    AssetSlot, BackendKind, FrameRGBA, HostCommand, Page, PageLayout, SequenceConfig, Viewport,
    WipeRequest,
};

#[derive(Parser, Debug)]
#[command(name = "scrollwipe", version)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the wipe at one progress value as a PNG.
    Frame(FrameArgs),
    /// Replay a timed event script against a page and print the host commands.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Sequence config JSON; asset paths resolve next to it.
    #[arg(long)]
    config: PathBuf,

    /// Wipe progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Sequence config JSON; asset paths resolve next to it.
    #[arg(long)]
    config: PathBuf,

    /// Page layout JSON.
    #[arg(long)]
    layout: PathBuf,

    /// Id of the section the sequence governs.
    #[arg(long)]
    section: String,

    /// Event script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Write every rendered frame here as a numbered PNG.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

/// One timed host event.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ScriptEvent {
    Scroll { at_ms: u64, y: f64 },
    Wheel { at_ms: u64, delta_y: f64 },
    TouchStart { at_ms: u64, y: f64 },
    TouchMove { at_ms: u64, y: f64 },
    Resize { at_ms: u64, viewport: Viewport },
    Tick { at_ms: u64 },
}

impl ScriptEvent {
    fn at_ms(&self) -> u64 {
        match self {
            Self::Scroll { at_ms, .. }
            | Self::Wheel { at_ms, .. }
            | Self::TouchStart { at_ms, .. }
            | Self::TouchMove { at_ms, .. }
            | Self::Resize { at_ms, .. }
            | Self::Tick { at_ms } => *at_ms,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn config_root(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn read_config(path: &Path) -> anyhow::Result<SequenceConfig> {
    SequenceConfig::from_json_path(path)
        .with_context(|| format!("load config '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.progress) {
        anyhow::bail!("--progress must be in [0, 1], got {}", args.progress);
    }
    let cfg = read_config(&args.config)?;
    let root = config_root(&args.config);

    let load = |slot: AssetSlot| -> anyhow::Result<scrollwipe::PreparedImage> {
        let spec = cfg.asset(slot);
        let rel = spec
            .path
            .as_deref()
            .with_context(|| format!("config has no {slot:?} image path"))?;
        Ok(load_asset(root, rel, spec.effective_tone(slot))?)
    };
    let source = load(AssetSlot::Source)?;
    let target = load(AssetSlot::Target)?;

    let mut backend = create_backend(BackendKind::Cpu);
    backend.render_wipe(&WipeRequest {
        viewport: cfg.viewport,
        progress: args.progress,
        source: &source,
        target: &target,
        separator: &cfg.separator,
        background_rgba: cfg.background_rgba,
    })?;
    let frame = backend
        .frame()
        .context("backend produced no frame")?;

    write_png(&args.out, frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let cfg = read_config(&args.config)?;
    let layout = PageLayout::from_json_path(&args.layout)
        .with_context(|| format!("load layout '{}'", args.layout.display()))?;
    let script: Vec<ScriptEvent> = {
        let f = File::open(&args.script)
            .with_context(|| format!("open script '{}'", args.script.display()))?;
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse script JSON")?
    };

    let viewport = cfg.viewport;
    let mut page = Page::new(layout, &args.section, cfg, viewport)?;
    if let Some(seq) = page.sequence_mut()
        && !seq.load_configured_assets(config_root(&args.config))
    {
        tracing::warn!("images did not load; the sequence will stay inactive");
    }

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
    }

    let mut written = 0u64;
    let mut renders = render_count(&page);
    for ev in script {
        let at_ms = ev.at_ms();
        let due = page.tick(at_ms);
        drain(&mut page, due, at_ms);

        let cmds = match ev {
            ScriptEvent::Scroll { y, .. } => page.on_scroll(y, at_ms),
            ScriptEvent::Wheel { delta_y, .. } => {
                let out = page.on_wheel(delta_y, at_ms);
                print_suppressed(at_ms, out.suppress_default);
                out.commands
            }
            ScriptEvent::TouchStart { y, .. } => {
                page.on_touch_start(y);
                Vec::new()
            }
            ScriptEvent::TouchMove { y, .. } => {
                let out = page.on_touch_move(y, at_ms);
                print_suppressed(at_ms, out.suppress_default);
                out.commands
            }
            ScriptEvent::Resize { viewport, .. } => page.on_resize(viewport, at_ms)?,
            ScriptEvent::Tick { .. } => Vec::new(),
        };
        drain(&mut page, cmds, at_ms);

        let now = render_count(&page);
        if now != renders {
            renders = now;
            if let (Some(dir), Some(frame)) = (
                &args.out_dir,
                page.sequence().and_then(|s| s.frame()),
            ) {
                write_png(&dir.join(format!("frame_{written:04}.png")), frame)?;
                written += 1;
            }
        }
    }

    if args.out_dir.is_some() {
        eprintln!("wrote {written} frame(s)");
    }
    Ok(())
}

fn render_count(page: &Page) -> u64 {
    page.sequence().map_or(0, |s| s.render_count())
}

/// Print commands and play out the scrolls they ask for, including any commands those
/// scrolls trigger in turn.
fn drain(page: &mut Page, cmds: Vec<HostCommand>, at_ms: u64) {
    let mut queue = VecDeque::from(cmds);
    while let Some(cmd) = queue.pop_front() {
        let line = serde_json::json!({ "at_ms": at_ms, "command": cmd });
        println!("{line}");
        queue.extend(page.apply(cmd, at_ms));
    }
}

fn print_suppressed(at_ms: u64, suppressed: bool) {
    if suppressed {
        println!("{}", serde_json::json!({ "at_ms": at_ms, "suppress_default": true }));
    }
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
