use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use crate::charts::{category_shares, grand_total, parse_date};
use crate::config::{shellexpand, Config};
use crate::db::{self, Database};
use crate::models::{SalesRecord, SalesTable};
use crate::report::{self, layout_pages, ReportKind};
use crate::ui::util::format_amount;

/// Dispatch a line-oriented command. `args[0]` is the command name.
pub(crate) fn as_cli(args: &[String], config: &Config) -> Result<()> {
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };
    let rest = &args[1..];
    match command.as_str() {
        "init" => cli_init(config),
        "add" => cli_add(rest, config),
        "categories" | "c" => cli_categories(config),
        "list" | "ls" => cli_list(rest, config),
        "summary" | "s" => cli_summary(config),
        "export" => cli_export(rest, config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("salesboard {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Salesboard: sales dashboard over a local SQLite store");
    println!();
    println!("Usage: salesboard [options] [command]");
    println!();
    println!("Options:");
    println!("  --db <path>                   Sales store (default: $SALESBOARD_DB or data dir)");
    println!("  --out, -o <dir>               Directory for exported reports (default: .)");
    println!("  -v, -vv, -q                   More or less logging");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive dashboard");
    println!("  init                          Create the store and seed example rows");
    println!("  add <category> <amount> <date>  Insert one sale (date as YYYY-MM-DD)");
    println!("  categories, c                 List distinct categories");
    println!("  list, ls                      Print every sale");
    println!("    --category <name>           Only sales in this category");
    println!("  summary, s                    Totals and share per category");
    println!("  export <xlsx|pdf> [path]      Write the full table as a report");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_init(config: &Config) -> Result<()> {
    let mut db = Database::open(&config.db_path)?;
    let seeded = db.seed_examples()?;
    if seeded == 0 {
        println!(
            "Store already has {} sales: {}",
            db.record_count()?,
            config.db_path.display()
        );
    } else {
        println!("Seeded {seeded} example sales into {}", config.db_path.display());
    }
    Ok(())
}

fn cli_add(args: &[String], config: &Config) -> Result<()> {
    let [category, amount, date] = args else {
        anyhow::bail!("Usage: salesboard add <category> <amount> <YYYY-MM-DD>");
    };
    let record = parse_record(category, amount, date)?;

    let db = Database::open(&config.db_path)?;
    let id = db.insert_record(&record)?;
    tracing::info!(id, category = %record.category, "inserted sale");
    println!("Added sale #{id}: {record}");
    Ok(())
}

fn parse_record(category: &str, amount: &str, date: &str) -> Result<SalesRecord> {
    if category.trim().is_empty() {
        anyhow::bail!("Category must not be empty");
    }
    let amount = Decimal::from_str(amount.trim())
        .with_context(|| format!("Invalid amount: {amount}"))?;
    if parse_date(date).is_none() {
        anyhow::bail!("Invalid date: {date} (expected YYYY-MM-DD)");
    }
    Ok(SalesRecord::new(
        category.trim().to_string(),
        amount,
        date.to_string(),
    ))
}

fn cli_categories(config: &Config) -> Result<()> {
    let table = db::load_all(&config.db_path)?;
    for category in table.distinct_categories() {
        println!("{category}");
    }
    Ok(())
}

fn cli_list(args: &[String], config: &Config) -> Result<()> {
    let category = args
        .windows(2)
        .find(|w| w[0] == "--category")
        .map(|w| w[1].as_str());

    let table = db::load_all(&config.db_path)?;
    let table = match category {
        Some(name) => table.filter_by_category(name),
        None => table,
    };
    print_table(&table);
    Ok(())
}

fn print_table(table: &SalesTable) {
    if table.is_empty() {
        println!("No sales");
        return;
    }
    let fields = table.fields();
    println!("{:<6} {:<20} {:>14} {}", "id", fields[0], fields[1], fields[2]);
    println!("{}", "─".repeat(55));
    for record in table {
        println!(
            "{:<6} {:<20} {:>14} {}",
            record.id.unwrap_or(0),
            record.category,
            format_amount(record.amount),
            record.date,
        );
    }
}

fn cli_summary(config: &Config) -> Result<()> {
    let table = db::load_all(&config.db_path)?;
    let shares = category_shares(&table)?;
    let total = grand_total(table.iter().map(|r| r.amount))?;

    println!("Salesboard: {}", config.db_path.display());
    println!("{}", "─".repeat(40));
    println!("  Sales:      {}", table.len());
    println!("  Total:      {}", format_amount(total));

    if !shares.is_empty() {
        println!();
        println!("By Category:");
        for share in &shares {
            println!(
                "  {:<20} {:>14} {:>6.1}%",
                share.category,
                format_amount(share.total),
                share.percent
            );
        }
    }
    Ok(())
}

fn cli_export(args: &[String], config: &Config) -> Result<()> {
    let Some(kind_arg) = args.first() else {
        anyhow::bail!("Usage: salesboard export <xlsx|pdf> [path]");
    };
    let kind = ReportKind::parse(kind_arg)
        .ok_or_else(|| anyhow::anyhow!("Unknown report format: {kind_arg} (use xlsx or pdf)"))?;
    let path = export_path(args.get(1).map(String::as_str), kind, config);

    let table = db::load_all(&config.db_path)?;
    let bytes = report::write_report(kind, &table, &path)?;
    match kind {
        ReportKind::Spreadsheet => println!(
            "Exported {} sales to {} ({bytes} bytes)",
            table.len(),
            path.display()
        ),
        ReportKind::Pdf => println!(
            "Exported {} sales to {} ({} pages, {bytes} bytes)",
            table.len(),
            path.display(),
            layout_pages(&table).len()
        ),
    }
    Ok(())
}

fn export_path(arg: Option<&str>, kind: ReportKind, config: &Config) -> PathBuf {
    arg.filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| config.export_dir.join(kind.file_name()))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
