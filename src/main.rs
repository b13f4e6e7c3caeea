mod app;
mod util;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pathview::canvas::Scene;
use pathview::render::{WindowRequest, render_window};
use pathview::source::{JsonDataset, NodeSource};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON dataset of path contexts and node records.
    #[arg(long)]
    data: PathBuf,

    /// Path context to open; defaults to the smallest known id.
    #[arg(long)]
    path_ctx: Option<i32>,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    from: i64,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    to: i64,

    /// Render once and print the draw commands as JSON lines.
    #[arg(long)]
    headless: bool,

    #[arg(long)]
    no_rotate: bool,

    /// Tracing filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_headless(args: &Args) -> Result<()> {
    let dataset = JsonDataset::load(&args.data)?;
    let path_ctx_id = match args.path_ctx {
        Some(id) => id,
        None => dataset
            .path_context_ids()?
            .first()
            .copied()
            .ok_or_else(|| anyhow!("dataset {} has no path contexts", args.data.display()))?,
    };

    let mut scene = Scene::new();
    let plan = render_window(
        &dataset,
        WindowRequest::new(path_ctx_id, args.from, args.to),
        &mut scene,
    )?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for command in &plan.commands {
        serde_json::to_writer(&mut out, command).context("failed to encode draw command")?;
        out.write_all(b"\n").context("failed to write draw command")?;
    }
    out.flush().context("failed to flush draw commands")?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    if args.headless {
        return run_headless(&args);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };
    let initial = app::InitialView {
        path_ctx_id: args.path_ctx,
        from_dist: args.from,
        to_dist: args.to,
        rotating: !args.no_rotate,
    };
    let data_path = args.data.clone();

    eframe::run_native(
        "pathview",
        options,
        Box::new(move |cc| Ok(Box::new(app::PathViewApp::new(cc, data_path, initial)))),
    )
    .map_err(|error| anyhow!("viewer failed: {error}"))
}
