use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use cocktails::Result;
use cocktails::assets::{AssetResolver, DirAssets, NoAssets};
use cocktails::catalog::Catalog;
use cocktails::config::AppConfig;
use cocktails::logging::{self, LogTarget};
use cocktails::nav::Route;
use cocktails::report::ShowOutput;
use cocktails::timer::{Phase, TimerController, format_mmss};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Config file (defaults to ./cocktails.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Terminal UI (recipe list + details + mixing timer)
    Tui {
        /// Route to open first: `list` or `details/<id>`
        #[arg(long, default_value = "list")]
        route: String,
    },
    /// Print the recipe catalog
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print one recipe by id
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Run a countdown in the terminal (`MM:SS` or seconds)
    Timer { duration: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = cocktails::config::load_or_default(args.config.as_deref())?;

    let target = match args.cmd {
        Command::Tui { .. } => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    logging::init(&cfg.log, target)?;

    match args.cmd {
        Command::Tui { route } => cmd_tui(&cfg, &route),
        Command::List { json } => cmd_list(&cfg, json),
        Command::Show { id, json } => cmd_show(&cfg, &id, json),
        Command::Timer { duration } => cmd_timer(&duration),
    }
}

fn load_catalog(cfg: &AppConfig) -> Result<Catalog> {
    let mut catalog = Catalog::builtin();
    for path in cfg.extra_catalogs() {
        catalog.extend_from_file(&path)?;
    }
    tracing::debug!(recipes = catalog.len(), "catalog ready");
    Ok(catalog)
}

fn cmd_tui(cfg: &AppConfig, route: &str) -> Result<()> {
    let start = Route::parse(route)?;
    let catalog = load_catalog(cfg)?;
    let assets: Box<dyn AssetResolver> = match cfg.assets_dir() {
        Some(dir) => Box::new(DirAssets::new(dir)),
        None => Box::new(NoAssets),
    };
    let app = cocktails::ui::App::new(
        catalog,
        assets,
        cfg.timer.selector(),
        Duration::from_millis(cfg.ui.tick_ms.max(10)),
    );
    tracing::info!(route = %start, "starting terminal ui");
    cocktails::ui::run_tui(app, start)
}

fn cmd_list(cfg: &AppConfig, json: bool) -> Result<()> {
    let catalog = load_catalog(cfg)?;
    println!("{}", cocktails::report::list(&catalog, json)?);
    Ok(())
}

fn cmd_show(cfg: &AppConfig, id: &str, json: bool) -> Result<()> {
    let catalog = load_catalog(cfg)?;
    match cocktails::report::show(&catalog, id, json)? {
        ShowOutput::Found(text) => {
            println!("{text}");
            Ok(())
        }
        ShowOutput::NotFound(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

fn cmd_timer(raw: &str) -> Result<()> {
    let total = cocktails::selector::parse_duration(raw)?;
    let mut timer = TimerController::new();
    timer.start(total, Instant::now());
    println!("{}", format_mmss(total));

    while timer.phase() == Phase::Running {
        if let Some(at) = timer.next_deadline() {
            std::thread::sleep(at.saturating_duration_since(Instant::now()));
        }
        for remaining in timer.poll(Instant::now()) {
            println!("{}", format_mmss(remaining));
        }
    }
    println!("Done");
    Ok(())
}
