use anyhow::{Context, bail};
use center_scan::capture::{
    CaptureAdapter, HeadlessCamera, NoOverlay, ReviewOutcome, ScanHandler,
    detection_channel,
};
use center_scan::models::{Barcode, CaptureSource, Point, QuadBounds, Size};
use center_scan::recognizer::{QrRecognizer, RecognitionWorker, recognize_batch};
use center_scan::tools::{load_event_script, parse_viewport, scan_dir_iter};
use center_scan::ScannerConfig;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scantool", version, about = "center_scan CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recognize a single image or PDF file through the review flow
    Scan {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Report every detection instead of picking one
        #[arg(long)]
        auto_report: bool,
        /// Index of the detection to tap and confirm
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Recognize every image under a directory in parallel
    ScanDir {
        #[arg(long)]
        root: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Replay recorded detection events through a live session
    Replay {
        #[arg(long)]
        events: PathBuf,
        /// Viewport size as WIDTHxHEIGHT
        #[arg(long, default_value = "390x844")]
        viewport: String,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the upright form of a quadrilateral given as TL TR BL BR
    Normalize {
        #[arg(num_args = 8, allow_negative_numbers = true)]
        coords: Vec<f32>,
    },
}

/// Prints every callback to stdout
struct Printer;

impl ScanHandler for Printer {
    fn on_capture(&mut self, source: CaptureSource, barcodes: &[Barcode]) {
        for b in barcodes {
            println!(
                "capture {:?} {} {} {}",
                source,
                b.id(),
                b.symbology(),
                b.payload().unwrap_or("<no payload>")
            );
        }
    }

    fn on_selection(&mut self, barcode: Option<&Barcode>, centered: bool) {
        match barcode {
            Some(b) => println!("selected {} centered={}", b.id(), centered),
            None => println!("selected none"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            file,
            config,
            auto_report,
            pick,
        } => scan_cmd(&file, config.as_deref(), auto_report, pick),
        Command::ScanDir { root, limit } => scan_dir_cmd(&root, limit),
        Command::Replay {
            events,
            viewport,
            config,
        } => replay_cmd(&events, &viewport, config.as_deref()),
        Command::Normalize { coords } => normalize_cmd(&coords),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ScannerConfig> {
    let config = match path {
        Some(path) => ScannerConfig::load(path).with_context(|| format!("config {:?}", path))?,
        None => ScannerConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn new_adapter(config: ScannerConfig) -> CaptureAdapter<HeadlessCamera, NoOverlay, Printer> {
    let worker = RecognitionWorker::new(Arc::new(QrRecognizer::new()));
    CaptureAdapter::new(config, HeadlessCamera, NoOverlay::default(), Printer, worker)
}

fn scan_cmd(
    file: &Path,
    config: Option<&Path>,
    auto_report: bool,
    pick: Option<usize>,
) -> anyhow::Result<()> {
    let mut config = load_config(config)?;
    config.auto_report_files |= auto_report;

    let mut adapter = new_adapter(config);
    adapter.mount(Size::new(390.0, 844.0));
    adapter.open_picker();

    let start = Instant::now();
    adapter.pick_file(file)?;
    let outcome = adapter
        .wait_recognition()
        .context("recognition worker stopped without a result")?;
    tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, ?outcome, "recognition finished");

    match outcome {
        ReviewOutcome::Reported(0) => println!("No codes found"),
        ReviewOutcome::Reported(_) => {}
        ReviewOutcome::Failed => bail!("could not scan {}", file.display()),
        ReviewOutcome::Discarded => bail!("review of {} was dismissed", file.display()),
        ReviewOutcome::AwaitingSelection(count) => {
            for (i, item) in adapter.review().items().iter().enumerate() {
                println!("  [{}] {:?}", i, item.kind);
            }
            let Some(index) = pick else {
                println!("{count} detections; rerun with --pick N to report one");
                adapter.dismiss_review();
                return Ok(());
            };
            let target = adapter
                .review()
                .items()
                .get(index)
                .map(|item| item.bounds.normalized().to_box().center())
                .with_context(|| format!("no detection at index {index}"))?;
            adapter.tap_review(target);
            if adapter.confirm_review().is_none() {
                bail!("tap on detection {index} did not select it");
            }
        }
    }

    adapter.unmount();
    Ok(())
}

fn scan_dir_cmd(root: &Path, limit: Option<usize>) -> anyhow::Result<()> {
    let paths: Vec<PathBuf> = scan_dir_iter(root, limit).collect();
    if paths.is_empty() {
        bail!("no scannable files under {}", root.display());
    }

    let start = Instant::now();
    let results = recognize_batch(&paths, &QrRecognizer::new(), None);
    let elapsed = start.elapsed();

    let mut found = 0;
    let mut failed = 0;
    for (path, result) in &results {
        match result {
            Ok(items) => {
                found += usize::from(!items.is_empty());
                println!("{}: {} detections", path.display(), items.len());
            }
            Err(err) => {
                failed += 1;
                println!("{}: error: {}", path.display(), err);
            }
        }
    }

    println!(
        "Files: {}  with codes: {}  failed: {}  time: {:.2?}",
        results.len(),
        found,
        failed,
        elapsed
    );
    Ok(())
}

fn replay_cmd(events: &Path, viewport: &str, config: Option<&Path>) -> anyhow::Result<()> {
    let viewport = parse_viewport(viewport)
        .with_context(|| format!("invalid viewport {viewport:?}; expected WIDTHxHEIGHT"))?;
    let config = load_config(config)?;
    let script = load_event_script(events)?;

    let (tx, rx) = detection_channel(config.event_capacity);
    let mut adapter = new_adapter(config);
    adapter.mount(viewport);

    let mut processed = 0;
    for event in script {
        // Keep the queue flowing instead of dropping recorded events.
        if !tx.emit(event.clone())? {
            processed += adapter.drain(&rx);
            tx.emit(event)?;
        }
    }
    processed += adapter.drain(&rx);

    println!("Replayed {processed} events");
    adapter.unmount();
    Ok(())
}

fn normalize_cmd(coords: &[f32]) -> anyhow::Result<()> {
    let [x1, y1, x2, y2, x3, y3, x4, y4] = coords else {
        bail!("expected 8 coordinates, got {}", coords.len());
    };
    let quad = QuadBounds::new(
        Point::new(*x1, *y1),
        Point::new(*x2, *y2),
        Point::new(*x3, *y3),
        Point::new(*x4, *y4),
    );
    let upright = quad.normalized();
    let b = upright.to_box();

    println!("rotation: {:?}", quad.rotation());
    println!(
        "upright: TL={:?} TR={:?} BL={:?} BR={:?}",
        upright.top_left, upright.top_right, upright.bottom_left, upright.bottom_right
    );
    println!("box: x={} y={} w={} h={}", b.x, b.y, b.width, b.height);
    Ok(())
}
