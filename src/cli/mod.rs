//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `launchdash sites`: known sites, labels, record counts, payload bounds
//! - `launchdash breakdown --site S`: success breakdown
//! - `launchdash correlation --site S --min KG --max KG`: payload/outcome points
//! - `launchdash config show|init|set|reset|path`: configuration management
//!
//! Every view command runs through a [`Session`], exactly like one page of
//! the web dashboard.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;

use crate::config::{self, DashConfig};
use crate::dataset::Dataset;
use crate::presentation::{CorrelationView, SuccessBreakdownView};
use crate::session::Session;

/// Output format for view commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

// ---------------------------------------------------------------------------
// launchdash sites
// ---------------------------------------------------------------------------

/// List known sites and the payload bounds.
pub fn run_sites(dataset: &Dataset, config: &DashConfig, format: OutputFormat) -> Result<()> {
    let session = Session::new(dataset);
    let bounds = session.payload_bounds();
    let rows: Vec<(&str, &str, usize)> = session
        .known_sites()
        .iter()
        .map(|site| {
            (
                site.as_str(),
                config.dashboard.site_label(site),
                dataset.records_at(site).count(),
            )
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "payload_bounds": bounds,
                "sites": rows.iter().map(|(id, label, records)| serde_json::json!({
                    "id": id,
                    "label": label,
                    "records": records,
                })).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
            writer.write_record(["site", "label", "records"])?;
            for (id, label, records) in &rows {
                writer.write_record([*id, *label, records.to_string().as_str()])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            println!("{}", "Launch Sites".bold().cyan());
            println!("{}", "=".repeat(60));
            println!("  {:<16} {:>8}  Label", "Site", "Records");
            println!("  {}", "-".repeat(58));
            for (id, label, records) in &rows {
                println!("  {:<16} {:>8}  {}", id, records, label.dimmed());
            }
            println!();
            println!(
                "  {} {} – {} kg",
                "Payload range:".bold(),
                format_kg(bounds.min),
                format_kg(bounds.max)
            );
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// launchdash breakdown
// ---------------------------------------------------------------------------

/// Show the success breakdown for one site or all sites.
pub fn run_breakdown(dataset: &Dataset, site: &str, format: OutputFormat) -> Result<()> {
    let mut session = Session::new(dataset);
    let views = session.on_site_selected(site)?;
    let view = views.breakdown;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Csv => write_breakdown_csv(&view, std::io::stdout().lock())?,
        OutputFormat::Table => print_breakdown_table(&view),
    }

    Ok(())
}

fn print_breakdown_table(view: &SuccessBreakdownView) {
    println!("{}", view.title.bold().cyan());
    println!("{}", "=".repeat(50));

    if view.is_empty() {
        println!("{}", "No data for this selection.".yellow());
        return;
    }

    println!("  {:<24} {:>8} {:>8}", "Category", "Count", "Share");
    println!("  {}", "-".repeat(48));
    for (i, category) in view.categories.iter().enumerate() {
        let line = format!(
            "  {:<24} {:>8} {:>7.1}%",
            truncate(&category.label, 24),
            category.value,
            share(category.value, view.total),
        );
        if i % 2 == 0 {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }
    println!("  {}", "-".repeat(48));
    println!("  {:<24} {:>8}", "Total".bold(), view.total);
}

fn write_breakdown_csv<W: Write>(view: &SuccessBreakdownView, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["label", "value"])?;
    for category in &view.categories {
        writer.write_record([category.label.clone(), category.value.to_string()])?;
    }
    writer.flush().context("failed to write CSV")
}

// ---------------------------------------------------------------------------
// launchdash correlation
// ---------------------------------------------------------------------------

/// Show the payload/outcome points for a site and payload range.
///
/// Missing bounds default to the dataset extent.
pub fn run_correlation(
    dataset: &Dataset,
    site: &str,
    min: Option<f64>,
    max: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let mut session = Session::new(dataset);
    let bounds = session.payload_bounds();
    session.on_site_selected(site)?;
    let views = session.on_payload_range_changed(
        min.unwrap_or(bounds.min),
        max.unwrap_or(bounds.max),
    )?;
    let view = views.correlation;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Csv => write_correlation_csv(&view, std::io::stdout().lock())?,
        OutputFormat::Table => print_correlation_table(&view),
    }

    Ok(())
}

fn print_correlation_table(view: &CorrelationView) {
    println!("{}", view.title.bold().cyan());
    println!(
        "  {} {} – {} kg",
        "Payload range:".bold(),
        format_kg(view.x_domain.low),
        format_kg(view.x_domain.high)
    );
    println!("{}", "=".repeat(50));

    if view.is_empty() {
        println!("{}", "No launches in this payload range.".yellow());
        return;
    }

    println!(
        "  {:>12} {:>6}  {}",
        view.x_axis_label, view.y_axis_label, view.group_label
    );
    println!("  {}", "-".repeat(48));
    for point in &view.points {
        let class = if point.y == 1 {
            "1".green()
        } else {
            "0".red()
        };
        println!("  {:>17} {:>6}  {}", format_kg(point.x), class, point.group);
    }

    println!();
    println!("{}", "By booster category".bold().cyan());
    for group in &view.groups {
        println!("  {:<12} {:>4}", group.name, group.count);
    }
}

fn write_correlation_csv<W: Write>(view: &CorrelationView, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["payload_mass_kg", "class", "booster_category"])?;
    for point in &view.points {
        writer.write_record([point.x.to_string(), point.y.to_string(), point.group.clone()])?;
    }
    writer.flush().context("failed to write CSV")
}

// ---------------------------------------------------------------------------
// launchdash config
// ---------------------------------------------------------------------------

/// Print the effective configuration as TOML.
pub fn run_config_show(config: &DashConfig) -> Result<()> {
    println!("{}", config::to_toml(config)?);
    Ok(())
}

pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} {}", "Wrote default config to".green(), path.display());
    Ok(())
}

pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    let path = config::set_config_value(key, value)?;
    println!("{} {} = {} ({})", "Set".green(), key, value, path.display());
    Ok(())
}

pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!("{} {}", "Reset config to defaults at".green(), path.display());
    Ok(())
}

/// Show where each config layer lives and whether it exists.
pub fn run_config_path() -> Result<()> {
    for (name, path) in [
        ("global", config::global_config_file()),
        ("project", config::project_config_file()),
    ] {
        match path {
            Some(p) => {
                let status = if p.exists() {
                    "exists".green()
                } else {
                    "missing".dimmed()
                };
                println!("  {:<8} {} ({})", name, p.display(), status);
            }
            None => println!("  {:<8} {}", name, "unavailable".yellow()),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Kilograms with thousands separators, one decimal only when needed.
fn format_kg(kg: f64) -> String {
    let rounded = (kg * 10.0).round() / 10.0;
    let whole = rounded.trunc() as u64;
    let frac = ((rounded - rounded.trunc()) * 10.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if frac == 0 {
        grouped
    } else {
        format!("{grouped}.{frac}")
    }
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64) * 100.0
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
