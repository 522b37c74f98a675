//! Martingale CLI — ladder, grid, P/L, export and import commands.
//!
//! Commands:
//! - `ladder` — generate the order ladder from settings
//! - `grid` — derived position, liquidation and P/L columns per row
//! - `pl` — exit table for the full position at a set of exit percents
//! - `export` — render rows as venue order commands
//! - `import` — filter an exchange state snapshot into rows
//! - `settings` — print the effective settings

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use martingale_core::{
    average_position, generate_ladder, import_snapshot, percent_price, pl_rows, render_orders,
    BinanceFuturesFormatter, BitfinexFormatter, DerivedGrid, GridParams, GridRow, IdSequence,
    LiveSnapshot, OrderRow, Settings, VenueFormatter, DEFAULT_EXIT_PERCENTS,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "martingale",
    about = "Martingale CLI — order ladder and position calculator"
)]
struct Cli {
    /// Path to a TOML settings file. Defaults to built-in settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and print the order ladder.
    Ladder {
        /// Print the rows as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print derived grid columns for generated or supplied rows.
    Grid {
        /// JSON file with order rows. Defaults to the generated ladder.
        #[arg(long)]
        rows: Option<PathBuf>,

        /// Write CSV to stdout instead of a table.
        #[arg(long, default_value_t = false)]
        csv: bool,
    },
    /// Print the P/L table for the full position.
    Pl {
        /// JSON file with order rows. Defaults to the generated ladder.
        #[arg(long)]
        rows: Option<PathBuf>,

        /// Exit price offsets in percent from the position price.
        #[arg(long = "exit-percent", allow_hyphen_values = true)]
        exit_percents: Vec<f64>,
    },
    /// Render rows as venue order commands, one per line.
    Export {
        /// Target venue.
        #[arg(long, value_enum)]
        venue: Venue,

        /// JSON file with order rows. Defaults to the generated ladder.
        #[arg(long)]
        rows: Option<PathBuf>,
    },
    /// Filter an exchange state snapshot into order and P/L rows.
    Import {
        /// JSON snapshot of positions and orders.
        #[arg(long)]
        snapshot: PathBuf,
    },
    /// Print the effective settings.
    Settings,
}

#[derive(Clone, Copy, ValueEnum)]
enum Venue {
    Bitfinex,
    BinanceFutures,
}

impl Venue {
    fn formatter(self) -> Box<dyn VenueFormatter> {
        match self {
            Venue::Bitfinex => Box::new(BitfinexFormatter),
            Venue::BinanceFutures => Box::new(BinanceFuturesFormatter),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Ladder { json } => run_ladder(&settings, json),
        Commands::Grid { rows, csv } => run_grid(&settings, rows.as_deref(), csv),
        Commands::Pl { rows, exit_percents } => run_pl(&settings, rows.as_deref(), &exit_percents),
        Commands::Export { venue, rows } => run_export(&settings, venue, rows.as_deref()),
        Commands::Import { snapshot } => run_import(&settings, &snapshot),
        Commands::Settings => run_settings(&settings),
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            let settings = Settings::from_file(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?;
            info!(path = %path.display(), symbol = %settings.symbol, "loaded settings");
            Ok(settings)
        }
        None => Ok(Settings::default()),
    }
}

/// Rows from `path`, or the ladder generated from `settings`.
fn load_rows(settings: &Settings, path: Option<&Path>) -> Result<Vec<OrderRow>> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let rows: Vec<OrderRow> = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse rows in {}", path.display()))?;
            info!(path = %path.display(), rows = rows.len(), "loaded rows");
            Ok(rows)
        }
        None => generate_ladder(settings, &mut IdSequence::new())
            .context("failed to generate ladder"),
    }
}

fn run_ladder(settings: &Settings, json: bool) -> Result<()> {
    let rows = load_rows(settings, None)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:>6} {:>14} {:>14} {:>14}", "Id", "Price", "Amount", "Cost");
    println!("{}", "-".repeat(51));
    for row in &rows {
        println!("{:>6} {:>14} {:>14} {:>14}", row.id, row.price, row.amount, row.cost());
    }
    println!();
    println!("Rows: {}", rows.len());

    if !rows.is_empty() {
        let position = average_position(&rows, None)?;
        println!("Position price: {}", position.price);
        println!("Position amount: {}", position.amount);
    }

    Ok(())
}

fn run_grid(settings: &Settings, rows_path: Option<&Path>, csv: bool) -> Result<()> {
    let rows = load_rows(settings, rows_path)?;
    let grid = DerivedGrid::build(&rows, GridParams::from(settings))
        .context("failed to derive grid")?;

    if csv {
        return write_grid_csv(grid.rows());
    }

    println!(
        "{:>6} {:>12} {:>10} {:>12} {:>10} {:>12} {:>12} {:>10} {:>8}",
        "Id", "Order", "Amount", "Position", "Size", "Liq", "Buffer", "P/L", "P/L%"
    );
    println!("{}", "-".repeat(102));
    for row in grid.rows() {
        println!(
            "{:>6} {:>12} {:>10} {:>12} {:>10} {:>12} {:>12} {:>10} {:>8}",
            row.id,
            row.order_price,
            row.order_amount,
            row.position_price,
            row.position_amount,
            row.position_liquidation_price,
            row.liquidation_buffer,
            row.fee_pl,
            row.fee_pl_percent,
        );
    }

    Ok(())
}

fn write_grid_csv(rows: impl Iterator<Item = GridRow>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn run_pl(settings: &Settings, rows_path: Option<&Path>, exit_percents: &[f64]) -> Result<()> {
    let rows = load_rows(settings, rows_path)?;
    let percents: &[f64] =
        if exit_percents.is_empty() { &DEFAULT_EXIT_PERCENTS } else { exit_percents };
    let exits = pl_rows(&rows, percents).context("failed to build P/L table")?;

    println!("{:>8} {:>14} {:>12} {:>14} {:>12} {:>8}", "Id", "Price", "Amount", "Exit", "P/L", "P/L%");
    println!("{}", "-".repeat(73));
    for exit in &exits {
        println!(
            "{:>8} {:>14} {:>12} {:>14} {:>12} {:>8}",
            exit.id,
            exit.price,
            exit.amount,
            exit.exit_price,
            exit.pl(settings.fee),
            exit.pl_percent(),
        );
    }

    Ok(())
}

fn run_export(settings: &Settings, venue: Venue, rows_path: Option<&Path>) -> Result<()> {
    let rows = load_rows(settings, rows_path)?;
    let formatter = venue.formatter();
    let commands = render_orders(formatter.as_ref(), settings, &rows)
        .with_context(|| format!("failed to render {} commands", formatter.name()))?;
    println!("{commands}");
    Ok(())
}

fn run_import(settings: &Settings, snapshot_path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(snapshot_path)
        .with_context(|| format!("failed to read {}", snapshot_path.display()))?;
    let snapshot = LiveSnapshot::from_json(&content)
        .with_context(|| format!("failed to parse snapshot {}", snapshot_path.display()))?;
    let imported = import_snapshot(&snapshot, settings);
    info!(
        order_rows = imported.order_rows.len(),
        pl_rows = imported.pl_rows.len(),
        "imported snapshot"
    );

    let output = serde_json::json!({
        "orderRows": imported.order_rows,
        "plRows": imported.pl_rows,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_settings(settings: &Settings) -> Result<()> {
    print!("{}", toml::to_string_pretty(settings)?);
    println!();
    println!(
        "# target price: {}",
        percent_price(settings.entry_price, settings.price_percent)
    );
    Ok(())
}
