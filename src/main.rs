// Sortvis: step-by-step sorting animations in the terminal

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use sortvis_client::TerminalCanvas;
use sortvis_engine::{BoardReport, SortBoard, SortCard, SurfaceSize};
use sortvis_utils::{AlgorithmKey, SortingSettings, VisualizerConfig};

type SharedOut = Arc<Mutex<Box<dyn Write + Send>>>;

#[derive(Parser, Debug)]
#[clap(name = "sortvis", version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Speed slider position; higher means a shorter pause per swap
    #[clap(long, global = true, env = "SORTVIS_SPEED")]
    speed: Option<u32>,

    /// Pixel spacing between bars; lower means more bars
    #[clap(long, global = true, env = "SORTVIS_DENSITY")]
    density: Option<u32>,

    /// JSON file overriding the visualizer constants
    #[clap(long, global = true, env = "SORTVIS_CONFIG", parse(from_os_str))]
    config: Option<PathBuf>,

    /// Virtual surface width in pixels
    #[clap(long, global = true, default_value_t = 300)]
    width: u32,

    /// Virtual surface height in pixels
    #[clap(long, global = true, default_value_t = 260)]
    height: u32,

    /// Terminal columns per chart
    #[clap(long, global = true, default_value_t = 60)]
    cols: usize,

    /// Terminal rows per chart
    #[clap(long, global = true, default_value_t = 8)]
    rows: usize,

    /// Seed for bar generation
    #[clap(long, global = true)]
    seed: Option<u64>,

    /// Run without drawing
    #[clap(long, short, global = true)]
    quiet: bool,

    /// Print run statistics as JSON
    #[clap(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Animate a single algorithm
    Sort {
        /// Algorithm key, e.g. quickSort or bubblesort
        algorithm: AlgorithmKey,
    },
    /// Animate every algorithm side by side
    All,
    /// List the available algorithms
    List,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Quiet by default so log lines don't land on top of the charts
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let keys = match &cli.command {
        Command::List => {
            for key in AlgorithmKey::ALL {
                println!("{:<16}{}", key.as_str(), key.display_name());
            }
            return Ok(());
        }
        Command::Sort { algorithm } => vec![*algorithm],
        Command::All => AlgorithmKey::ALL.to_vec(),
    };

    let settings = Arc::new(SortingSettings::new(load_config(&cli)?)?);
    if let Some(speed) = cli.speed {
        let applied = settings.set_speed(speed);
        if applied != speed {
            warn!("Speed {} out of range, using {}", speed, applied);
        }
    }
    if let Some(density) = cli.density {
        let applied = settings.set_density(density);
        if applied != density {
            warn!("Density {} out of range, using {}", density, applied);
        }
    }

    let report = animate(&cli, &keys, settings).await?;
    print_report(&report, cli.json)
}

fn load_config(cli: &Cli) -> anyhow::Result<VisualizerConfig> {
    match &cli.config {
        Some(path) => VisualizerConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(VisualizerConfig::default()),
    }
}

/// Stack one canvas per algorithm down the screen and sort them all
async fn animate(
    cli: &Cli,
    keys: &[AlgorithmKey],
    settings: Arc<SortingSettings>,
) -> anyhow::Result<BoardReport> {
    let sink: Box<dyn Write + Send> = if cli.quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };
    let out: SharedOut = Arc::new(Mutex::new(sink));

    let mut board = SortBoard::new(Arc::clone(&settings));
    let mut canvases = Vec::with_capacity(keys.len());
    let mut next_row = 1;
    for (index, &key) in keys.iter().enumerate() {
        let canvas = Arc::new(TerminalCanvas::new(
            key.display_name(),
            SurfaceSize::new(cli.width, cli.height),
            (cli.cols, cli.rows),
            next_row,
            Arc::clone(&out),
        ));
        next_row += canvas.height_in_rows() + 1;

        let mut card = SortCard::new(key, Arc::clone(&settings), canvas.clone());
        if let Some(seed) = cli.seed {
            card = card.with_seed(seed.wrapping_add(index as u64));
        }
        board.add_card(card);
        canvases.push(canvas);
    }

    // Clear screen, hide cursor
    write_raw(&out, "\x1b[2J\x1b[?25l")?;
    for canvas in &canvases {
        canvas.mark_ready();
    }
    board.refresh_all().context("draw initial bars")?;
    tokio::time::sleep(Duration::from_millis(
        settings.config().canvas.resize_debounce_ms,
    ))
    .await;

    info!(
        "Sorting {} with a {:?} delay per swap",
        keys.len(),
        settings.current_delay()
    );
    let result = tokio::select! {
        result = board.sort_all() => result.context("sort"),
        _ = tokio::signal::ctrl_c() => Err(anyhow::anyhow!("interrupted")),
    };

    // Park the cursor below the last chart and show it again
    write_raw(&out, &format!("\x1b[{};1H\x1b[?25h", next_row))?;
    result
}

fn write_raw(out: &SharedOut, text: &str) -> anyhow::Result<()> {
    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .context("write to terminal")
}

fn print_report(report: &BoardReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("serialize report")?
        );
        return Ok(());
    }
    for result in &report.results {
        println!(
            "{:<16}{:>4} bars {:>6} swaps {:>6} comparisons",
            result.algorithm.display_name(),
            result.bars,
            result.stats.swaps,
            result.stats.comparisons
        );
    }
    Ok(())
}
