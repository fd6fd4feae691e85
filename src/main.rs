mod api;
mod app;
mod color;
mod config;
mod export;
mod gallery;
mod input;
mod load;
mod palette;
mod storage;
mod tui;
mod verify;

use anyhow::Context;
use api::{AnalysisMethod, PaletteApi, PaletteClient, PaletteId};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "moodswatch", version, about = "Turn how you feel into a colour palette")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the palette service URL from the config.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Check that the service is up.
    Health,
    /// Generate a palette from text and print it (headless).
    Generate {
        /// Text to analyse; several words are joined with spaces.
        #[arg(required = true)]
        text: Vec<String>,
        #[arg(long, value_enum)]
        method: Option<AnalysisMethod>,
        /// Also write the palette as a PNG into the export dir.
        #[arg(long)]
        export: bool,
    },
    /// List stored palettes, newest first (headless).
    Gallery {
        #[arg(long)]
        limit: Option<u32>,
        /// Dump the entries as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Delete a stored palette by id.
    Delete { id: String },
    /// Print service statistics.
    Stats,
    /// Run the service verification checklist.
    Verify,
    /// Fire a batch of analyze requests and report latencies.
    Load {
        #[arg(long, default_value_t = 50)]
        count: usize,
        /// Run with this many concurrent workers instead of sequentially.
        #[arg(long)]
        concurrent: Option<usize>,
        /// Also run a volume phase over four text lengths.
        #[arg(long)]
        volume: bool,
        /// Requests per text length in the volume phase.
        #[arg(long, default_value_t = 10)]
        per_length: usize,
        /// Write the summaries and recommendations as JSON.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load(cli.config.as_deref()).context("load config")?;
    if let Some(url) = cli.base_url {
        cfg.api.base_url = url;
    }

    let command = cli.command.unwrap_or(Command::Tui);
    if matches!(command, Command::Tui) {
        init_logging(Some(&cfg.paths.data_dir.join("moodswatch.log")))?;
    } else {
        init_logging(None)?;
    }

    match command {
        Command::Tui => {
            let mut app = app::App::new(cfg.clone())?;
            let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Health => {
            let client = make_client(&cfg)?;
            let health = client.health().await?;
            println!("{}: {}", client.base_url(), health.status);
            if let Some(api) = &health.api {
                println!("api: {api}");
            }
            if !health.features.is_empty() {
                println!("features: {}", health.features.join(", "));
            }
            if !health.is_healthy() {
                anyhow::bail!("service reports status {:?}", health.status);
            }
        }
        Command::Generate {
            text,
            method,
            export,
        } => {
            let text = text.join(" ");
            if text.trim().is_empty() {
                anyhow::bail!("text must not be empty");
            }
            let method = method.unwrap_or(cfg.analysis.method);
            let client = make_client(&cfg)?;
            let analysis = client.analyze(text.trim(), method).await?;
            let panel = palette::PalettePanel::from_analysis(text.trim(), &analysis);
            if let palette::PalettePanel::Error(e) = &panel {
                anyhow::bail!("{e}");
            }
            print_swatches(panel.swatches());
            if let Some(summary) = analysis.summary() {
                println!("{}", summary.dark_grey());
            }
            if let Some(translated) = analysis.translated_text.as_deref().filter(|t| *t != text.trim()) {
                println!("{}", format!("translated: {translated}").dark_grey());
            }
            if export {
                let path = export::export_png(panel.swatches(), &cfg.export.dir)?;
                println!("exported {}", path.display());
            }
        }
        Command::Gallery { limit, json } => {
            let client = make_client(&cfg)?;
            let listing = client.gallery(limit.or(cfg.gallery.limit)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&listing.entries)?);
            } else {
                print_gallery(&listing);
            }
        }
        Command::Delete { id } => {
            let client = make_client(&cfg)?;
            let id = PaletteId(id);
            client.delete_palette(&id).await?;
            println!("deleted palette {id}");
        }
        Command::Stats => {
            let client = make_client(&cfg)?;
            let stats = client.stats().await?;
            print_stats(&stats);
        }
        Command::Verify => {
            let client = make_client(&cfg)?;
            let paths = verify::LocalPaths {
                database: cfg.verify.database_path.clone(),
                test_file: cfg.verify.test_file.clone(),
            };
            let reports = verify::run_checklist(&client, &paths).await;
            verify::print_report(client.base_url(), &reports);
        }
        Command::Load {
            count,
            concurrent,
            volume,
            per_length,
            out,
        } => {
            let client: Arc<dyn PaletteApi> = Arc::new(make_client(&cfg)?);
            load::ensure_available(client.as_ref()).await?;
            let mode = match concurrent {
                Some(workers) => load::Mode::Concurrent { workers },
                None => load::Mode::Sequential,
            };
            tracing::info!(count, ?mode, base_url = %cfg.api.base_url, "starting load test");
            let samples = load::run(client.clone(), count, mode).await;
            let mut summaries = vec![load::summarize(mode, &samples)];
            if volume {
                summaries.extend(load::run_volume(client.as_ref(), per_length).await);
            }
            for summary in &summaries {
                load::print_summary(summary);
            }
            let report = load::Report {
                recommendations: load::recommendations(&summaries),
                summaries,
            };
            load::print_recommendations(&report.recommendations);
            if let Some(path) = out {
                load::write_report(&report, &path)?;
                println!("report written to {}", path.display());
            }
        }
    }

    Ok(())
}

/// TUI mode logs to a file so output never lands on the alternate screen.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create dir {}", parent.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn make_client(cfg: &config::Config) -> anyhow::Result<PaletteClient> {
    PaletteClient::new(&cfg.api.base_url, cfg.api.timeout())
}

fn print_swatches(swatches: &[palette::Swatch]) {
    for s in swatches {
        match s.rgba {
            Some(c) => {
                let block = "      ".on(crossterm::style::Color::Rgb {
                    r: c[0],
                    g: c[1],
                    b: c[2],
                });
                println!("{block} {}", s.value);
            }
            None => println!("{} {}", "  ??  ".red(), s.value),
        }
    }
}

fn print_gallery(listing: &api::GalleryListing) {
    println!("{} palettes", listing.total);
    for entry in &listing.entries {
        let card = gallery::GalleryCard::from_entry(entry);
        let strip: String = card
            .swatches
            .iter()
            .map(|s| match s.rgba {
                Some(c) => format!(
                    "{}",
                    "   ".on(crossterm::style::Color::Rgb {
                        r: c[0],
                        g: c[1],
                        b: c[2],
                    })
                ),
                None => " ? ".to_string(),
            })
            .collect();
        println!(
            "{:>5}  {strip}  {}  {}",
            card.id.as_str(),
            card.timestamp.as_str().dark_grey(),
            card.quote
        );
    }
}

fn print_stats(stats: &api::Stats) {
    println!("total palettes: {}", stats.total_palettes);
    if let Some(v) = &stats.api_version {
        println!("api version:    {v}");
    }
    if !stats.methods_usage.is_empty() {
        println!("methods:");
        for (method, n) in &stats.methods_usage {
            println!("  {method:<10} {n}");
        }
    }
    if !stats.emotions_distribution.is_empty() {
        println!("emotions:");
        for (emotion, n) in &stats.emotions_distribution {
            println!("  {emotion:<14} {n}");
        }
    }
    if let Some(e) = &stats.error {
        println!("{}", format!("service error: {e}").red());
    }
}
