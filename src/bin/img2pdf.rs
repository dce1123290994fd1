//! CLI binary for img2pdf.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use img2pdf::{
    convert_to_file, inspect, ConversionConfig, ConversionProgressCallback, PageSize,
    ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and per-file log
/// lines using [indicatif].
struct CliProgressCallback {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
    /// Per-file wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<usize, Instant>>,
    /// Count of files that errored out.
    errors: AtomicUsize,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set by
    /// `on_conversion_start` (called before any file is processed).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_conversion_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading images…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            errors: AtomicUsize::new(0),
        })
    }

    /// Switch to the full progress-bar style once we know `total`.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} images  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_files: usize) {
        self.activate_bar(total_files);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_files} images…"))
        ));
    }

    fn on_file_start(&self, file_num: usize, _total: usize, name: &str) {
        self.start_times
            .lock()
            .unwrap()
            .insert(file_num, Instant::now());
        self.bar.set_message(name.to_string());
    }

    fn on_file_complete(&self, file_num: usize, total: usize, name: &str) {
        let elapsed_ms = self
            .start_times
            .lock()
            .unwrap()
            .remove(&file_num)
            .map(|t| t.elapsed().as_millis())
            .unwrap_or(0);

        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {:<32}  {}",
            green("✓"),
            file_num,
            total,
            name,
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, file_num: usize, total: usize, _name: &str, error: String) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        // Truncate very long error messages to keep output tidy.
        let msg = if error.len() > 96 {
            format!("{}\u{2026}", &error[..95])
        } else {
            error
        };

        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}",
            red("✗"),
            file_num,
            total,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, total_files: usize, success_count: usize) {
        let failed = total_files.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} images embedded",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} images embedded  ({} failed)",
                if success_count == 0 { red("✘") } else { cyan("⚠") },
                bold(&success_count.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Bundle two photos into images.pdf (one page each, half size, centered)
  img2pdf front.png back.jpg

  # Name the output
  img2pdf scans/*.jpg -o scans.pdf

  # Full-size images on pages that wrap them exactly
  img2pdf --scale 1.0 --page-size fit diagram.png

  # US Letter pages with a document title
  img2pdf --page-size letter --title "Receipts 2025" receipts/*.jpg

  # Machine-readable report of what happened to each file
  img2pdf --json photos/*.png > report.json

  # Inspect image headers without producing a document
  img2pdf --inspect-only photo.jpg

PAGE SIZES:
  a4        595.28 × 841.89 pt (default)
  letter    612 × 792 pt
  fit       each page shrink-wrapped to its scaled image
  WxH       custom size in points, e.g. 400x600

FAILURE HANDLING:
  A file that cannot be embedded (unsupported type, broken data) is
  reported and skipped; the remaining files still get their pages and the
  document is written. Only an unreadable input path or an unwritable
  output aborts the run.
"#;

/// Bundle PNG and JPEG images into a PDF document, one page per image.
#[derive(Parser, Debug)]
#[command(
    name = "img2pdf",
    version,
    about = "Bundle PNG and JPEG images into a PDF document, one page per image",
    long_about = "Bundle PNG and JPEG images into a PDF document. Each image lands on its own \
page, drawn at a configurable scale (default: half its pixel dimensions) and centered. JPEG \
data is embedded without re-encoding; PNG transparency is preserved.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Image files, in page order.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write the PDF to this file.
    #[arg(short, long, env = "IMG2PDF_OUTPUT", default_value = "images.pdf")]
    output: PathBuf,

    /// Draw scale applied to each image's pixel dimensions.
    #[arg(long, env = "IMG2PDF_SCALE", default_value_t = 0.5)]
    scale: f32,

    /// Page size: a4, letter, fit, or WxH in points.
    #[arg(long, env = "IMG2PDF_PAGE_SIZE", default_value = "a4")]
    page_size: String,

    /// Document title written to the PDF Info dictionary.
    #[arg(long, env = "IMG2PDF_TITLE")]
    title: Option<String>,

    /// Skip Flate compression of content and image streams.
    #[arg(long, env = "IMG2PDF_NO_COMPRESS")]
    no_compress: bool,

    /// Print a structured JSON report (per-file results + stats) to stdout.
    #[arg(long, env = "IMG2PDF_JSON")]
    json: bool,

    /// Print image header facts only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Disable progress bar.
    #[arg(long, env = "IMG2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "IMG2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "IMG2PDF_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let mut infos = Vec::with_capacity(cli.files.len());
        for path in &cli.files {
            let info = inspect(path)
                .await
                .with_context(|| format!("Failed to inspect {}", path.display()))?;
            infos.push(info);
        }

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&infos).context("Failed to serialize image info")?
            );
        } else {
            for info in &infos {
                println!(
                    "{:<32} {}  {}x{} px  {}-bit  {} channel{}",
                    info.name,
                    info.content_type,
                    info.width,
                    info.height,
                    info.bit_depth,
                    info.channels,
                    if info.channels == 1 { "" } else { "s" },
                );
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let page_size = parse_page_size(&cli.page_size)?;

    let mut builder = ConversionConfig::builder()
        .scale(cli.scale)
        .page_size(page_size)
        .compress(!cli.no_compress);
    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let output = convert_to_file(&cli.files, &cli.output, &config)
        .await
        .context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise report")?;
        println!("{json}");
    }

    // Summary line (the callback already printed the per-file log).
    if !cli.quiet {
        eprintln!(
            "{}  {}/{} pages  {}ms  →  {}",
            if output.stats.failed_files == 0 {
                green("✔")
            } else {
                cyan("⚠")
            },
            output.stats.page_count,
            output.stats.total_files,
            output.stats.total_duration_ms,
            bold(&cli.output.display().to_string()),
        );
        eprintln!(
            "   {} bytes  {}",
            dim(&output.stats.pdf_bytes.to_string()),
            dim(&format!(
                "({}ms embed, {}ms assemble)",
                output.stats.embed_duration_ms, output.stats.assemble_duration_ms
            )),
        );
        if !show_progress {
            // Without the live callback, failures still need a voice.
            for err in output.errors() {
                eprintln!("   {}", red(&err.to_string()));
            }
        }
    }

    Ok(())
}

/// Parse `--page-size` into [`PageSize`].
fn parse_page_size(s: &str) -> Result<PageSize> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "a4" => Ok(PageSize::A4),
        "letter" => Ok(PageSize::Letter),
        "fit" => Ok(PageSize::Fit),
        custom => {
            let (w, h) = custom
                .split_once(['x', '×'])
                .with_context(|| format!("Invalid page size '{custom}': expected a4, letter, fit, or WxH"))?;
            let w: f32 = w.trim().parse().context("Invalid page width")?;
            let h: f32 = h.trim().parse().context("Invalid page height")?;
            if w <= 0.0 || h <= 0.0 {
                anyhow::bail!("Page dimensions must be positive, got {w}x{h}");
            }
            Ok(PageSize::Custom(w, h))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_keywords_parse() {
        assert_eq!(parse_page_size("a4").unwrap(), PageSize::A4);
        assert_eq!(parse_page_size("Letter").unwrap(), PageSize::Letter);
        assert_eq!(parse_page_size(" fit ").unwrap(), PageSize::Fit);
    }

    #[test]
    fn custom_page_size_parses_wxh() {
        assert_eq!(
            parse_page_size("400x600").unwrap(),
            PageSize::Custom(400.0, 600.0)
        );
        assert_eq!(
            parse_page_size("210.5X297").unwrap(),
            PageSize::Custom(210.5, 297.0)
        );
    }

    #[test]
    fn bad_page_sizes_are_rejected() {
        assert!(parse_page_size("a5").is_err());
        assert!(parse_page_size("0x100").is_err());
        assert!(parse_page_size("wide").is_err());
    }
}
