use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;

use rusty_orders::app::RustyOrdersApp;
use rusty_orders::cli::Args;
use rusty_orders::data::cache::DatasetCache;
use rusty_orders::data::filter::{filter, DateRange, OrderView};
use rusty_orders::report::Report;
use rusty_orders::state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.summary {
        return print_summary(&args);
    }

    let mut state = AppState::new(args.bins);
    state.open(args.path.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Orders – E-commerce Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(RustyOrdersApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}

/// Headless mode: load, filter and print the report.
fn print_summary(args: &Args) -> Result<()> {
    let cache = DatasetCache::new(&args.path);
    let table = cache.get()?;

    let report = match table.purchase_date_bounds() {
        Some(bounds) => {
            let range = DateRange::new(
                args.start.unwrap_or(bounds.start),
                args.end.unwrap_or(bounds.end),
            )
            .clamp_to(bounds);
            println!("Orders from {} to {}\n", range.start, range.end);
            Report::compute(&filter(table, range), args.bins)
        }
        None => {
            println!("No order has a purchase timestamp\n");
            Report::compute(&OrderView::empty(table), args.bins)
        }
    };

    print!("{report}");
    Ok(())
}
