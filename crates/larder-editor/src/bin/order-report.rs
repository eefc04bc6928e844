//! # Order Report
//!
//! Prints the figures the order screens would show for a saved order file.
//!
//! ## Usage
//! ```bash
//! # Retail order: totals and balance
//! cargo run -p larder-editor --bin order-report -- order.json
//!
//! # Wholesale order grouped by product, with case completion folded in
//! cargo run -p larder-editor --bin order-report -- --wholesale --adjust wholesale.json
//!
//! # Explicit config file
//! cargo run -p larder-editor --bin order-report -- --config ./larder.toml order.json
//! ```

use std::env;
use std::path::PathBuf;

use larder_core::{Order, WholesaleOrder};
use larder_editor::{init_tracing, read_json, EditorConfig, OrderEditor, WholesaleEditor};
use tracing::info;

fn print_usage() {
    println!("Larder Order Report");
    println!();
    println!("Usage: order-report [OPTIONS] <ORDER.json>");
    println!();
    println!("Options:");
    println!("  -w, --wholesale      Treat the file as a wholesale order");
    println!("  -a, --adjust         Add case-completion lines to wholesale groups");
    println!("  -r, --reprice        Recompute retail line totals instead of using stored ones");
    println!("  -c, --config <PATH>  Config file (default: platform config dir)");
    println!("  -h, --help           Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut wholesale = false;
    let mut adjust = false;
    let mut reprice = false;
    let mut config_path: Option<PathBuf> = None;
    let mut order_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--wholesale" | "-w" => wholesale = true,
            "--adjust" | "-a" => adjust = true,
            "--reprice" | "-r" => reprice = true,
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => order_path = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    let Some(order_path) = order_path else {
        print_usage();
        return Err("missing order file".into());
    };

    init_tracing();
    let config = EditorConfig::load(config_path)?;
    info!(?order_path, wholesale, "Reading order");

    if wholesale {
        let order: WholesaleOrder = read_json(&order_path)?;
        let mut options = config.grouping_options();
        options.calculate_adjustments |= adjust;
        let editor = WholesaleEditor::new(order, options);
        let summary = editor.summary();

        println!("{:<40} {:>10} {:>10} {:>12}", "Product", "Cases", "Units", "Cost");
        for group in &summary.groups {
            println!(
                "{:<40} {:>10} {:>10} {:>12}",
                group.description,
                group.qty_sum.round_dp(3).normalize(),
                group.qty_units.normalize(),
                config.format_currency(group.total_sum)
            );
            if let Some(completion) = group.case_completion {
                println!(
                    "  needs {} EA to complete the case ({})",
                    completion.quantity.normalize(),
                    config.format_currency(completion.cost)
                );
            }
        }
        println!();
        println!("Products:    {:>12}", config.format_currency(summary.product_total));
        println!("Adjustments: {:>12}", config.format_currency(summary.adjustment_total));
        println!("Order total: {:>12}", config.format_currency(summary.order_total));
    } else {
        let order: Order = read_json(&order_path)?;
        let mut editor = OrderEditor::new(order, config.tax_rate());
        if reprice {
            editor.reprice_all();
        }
        let totals = editor.totals();

        for item in editor.line_items() {
            println!(
                "{:<10} {:<40} {:>8} {:>12}",
                format!("{:?}", item.kind),
                item.description,
                item.quantity().normalize(),
                config.format_currency(item.total)
            );
        }
        println!();
        println!("Subtotal:    {:>12}", config.format_currency(totals.subtotal));
        println!("Adjustments: {:>12}", config.format_currency(totals.adjustments));
        println!("Taxes:       {:>12}", config.format_currency(totals.taxes));
        println!("Order total: {:>12}", config.format_currency(totals.order_total));
        println!("Payments:    {:>12}", config.format_currency(totals.payments));
        println!("Credits:     {:>12}", config.format_currency(totals.credits));

        let status = editor.balance_status();
        println!("{}: {}", status.label(), config.format_currency(status.amount()));
    }

    Ok(())
}
