//! Terminal output of the generate, analyze, dashboard and serve commands

use std::net::SocketAddr;
use std::path::Path;

use crate::core::constants::{display, files, output_formats};
use crate::core::error::Result;
use crate::core::types::{Customer, Transaction};
use crate::reporting::DashboardSummary;
use crate::storage::DataPaths;
use crate::ui::color::{Colors, colorize, emoji};
use crate::ui::format::{
    format_currency, format_currency_cents, format_decimal, format_percent, format_thousands,
};

/// Columns of `transactions.csv`
const TRANSACTION_COLUMNS: usize = 11;
/// Columns of `customers.csv`
const CUSTOMER_COLUMNS: usize = 5;

fn section_title(symbol: &str, title: &str) -> String {
    format!(
        "{}{}",
        emoji(symbol),
        colorize(&colorize(title, Colors::BOLD), Colors::BRIGHT_BLUE)
    )
}

/// Pad cells into aligned columns; columns after the first are right aligned
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                let pad = width.saturating_sub(cell.chars().count());
                if i == 0 {
                    format!("{cell}{}", " ".repeat(pad))
                } else {
                    format!("{}{cell}", " ".repeat(pad))
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render_row(headers.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(render_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

/// Preview and shapes printed after `generate`
pub fn format_generation_summary(
    transactions: &[Transaction],
    customers: &[Customer],
    paths: &DataPaths,
) -> String {
    let preview: Vec<Vec<String>> = transactions
        .iter()
        .take(files::PREVIEW_ROWS)
        .map(|t| {
            vec![
                t.transaction_id.clone(),
                t.date.to_string(),
                t.customer_id.clone(),
                t.category.label().to_string(),
                t.product.clone(),
                t.quantity.to_string(),
                format_decimal(t.unit_price, 2),
                format_decimal(t.total_amount, 2),
                t.status.to_string(),
            ]
        })
        .collect();

    let mut out = Vec::new();
    out.push(format!(
        "{}{}",
        emoji("✅"),
        colorize("Data generated successfully", Colors::BRIGHT_GREEN)
    ));
    out.push(String::new());
    out.push(section_title(display::FILE_EMOJI, "Files"));
    out.push(format!("   {}", paths.transactions.display()));
    out.push(format!("   {}", paths.customers.display()));
    out.push(String::new());
    out.push(section_title("🔍", "Preview"));
    out.push(render_table(
        &[
            "ID", "Date", "Customer", "Category", "Product", "Qty", "Price", "Total", "Status",
        ],
        &preview,
    ));
    out.push(String::new());
    out.push(format!(
        "Transactions: ({}, {TRANSACTION_COLUMNS})",
        transactions.len()
    ));
    out.push(format!("Customers: ({}, {CUSTOMER_COLUMNS})", customers.len()));
    out.join("\n")
}

pub fn display_generation_summary(
    transactions: &[Transaction],
    customers: &[Customer],
    paths: &DataPaths,
) {
    println!("{}", format_generation_summary(transactions, customers, paths));
}

/// Render an analysis summary in the requested output format
pub fn format_analysis(summary: &DashboardSummary, output_format: &str) -> Result<String> {
    match output_format {
        output_formats::JSON => Ok(serde_json::to_string_pretty(summary)?),
        output_formats::MINIMAL => Ok(format_minimal_analysis(summary)),
        _ => Ok(format_text_analysis(summary)),
    }
}

pub fn display_analysis(summary: &DashboardSummary, output_format: &str) -> Result<()> {
    println!("{}", format_analysis(summary, output_format)?);
    Ok(())
}

/// One `key value` pair per line, no colors or emojis
fn format_minimal_analysis(summary: &DashboardSummary) -> String {
    let kpis = &summary.kpis;
    let mut lines = vec![
        format!("total_revenue {:.2}", kpis.total_revenue),
        format!("total_transactions {}", kpis.total_transactions),
        format!("average_order_value {:.2}", kpis.average_order_value),
        format!("total_customers {}", kpis.total_customers),
        format!("total_products_sold {}", kpis.total_products_sold),
        format!("conversion_rate {:.2}", kpis.conversion_rate),
    ];
    lines.extend(
        summary
            .categories
            .iter()
            .map(|c| format!("category\t{}\t{:.2}", c.category, c.revenue)),
    );
    lines.extend(
        summary
            .top_products
            .iter()
            .map(|p| format!("product\t{}\t{:.2}", p.product, p.revenue)),
    );
    lines.extend(
        summary
            .segments
            .iter()
            .map(|s| format!("segment\t{}\t{}", s.segment, s.customers)),
    );
    lines.join("\n")
}

fn format_text_analysis(summary: &DashboardSummary) -> String {
    let kpis = &summary.kpis;
    let mut out = Vec::new();

    out.push(section_title("📈", "Key Metrics"));
    out.push(format!(
        "   Filters: {} ({} of {} transactions)",
        summary.filter.describe(),
        format_thousands(summary.filtered_rows as u64),
        format_thousands(summary.total_rows as u64)
    ));
    let kpi_lines = [
        (display::REVENUE_EMOJI, "Revenue", format_currency(kpis.total_revenue)),
        (
            display::TRANSACTIONS_EMOJI,
            "Transactions",
            format_thousands(kpis.total_transactions as u64),
        ),
        (
            display::BASKET_EMOJI,
            "Average basket",
            format_currency_cents(kpis.average_order_value),
        ),
        (
            display::CUSTOMERS_EMOJI,
            "Customers",
            format_thousands(kpis.total_customers as u64),
        ),
        (
            display::UNITS_EMOJI,
            "Products sold",
            format_thousands(kpis.total_products_sold),
        ),
        (
            display::CONVERSION_EMOJI,
            "Conversion rate",
            format_percent(kpis.conversion_rate),
        ),
    ];
    for (symbol, label, value) in kpi_lines {
        out.push(format!(
            "   {}{label:<16} {}",
            emoji(symbol),
            colorize(&value, Colors::CYAN)
        ));
    }

    out.push(String::new());
    out.push(section_title("🗂️", "Sales by Category"));
    out.push(render_table(
        &["Category", "Revenue", "Transactions", "Units"],
        &summary
            .categories
            .iter()
            .map(|c| {
                vec![
                    c.category.label().to_string(),
                    format_currency(c.revenue),
                    format_thousands(c.transactions as u64),
                    format_thousands(c.units_sold),
                ]
            })
            .collect::<Vec<_>>(),
    ));

    out.push(String::new());
    out.push(section_title(
        display::TROPHY_EMOJI,
        &format!("Top {} Products", summary.top_n),
    ));
    out.push(render_table(
        &["Product", "Category", "Revenue", "Units", "Orders"],
        &summary
            .top_products
            .iter()
            .map(|p| {
                vec![
                    p.product.clone(),
                    p.category.label().to_string(),
                    format_currency(p.revenue),
                    format_thousands(p.units_sold),
                    format_thousands(p.orders as u64),
                ]
            })
            .collect::<Vec<_>>(),
    ));

    out.push(String::new());
    out.push(section_title(display::CUSTOMERS_EMOJI, "Customer Segments"));
    out.push(render_table(
        &["Segment", "Customers", "Revenue", "Avg spend", "Avg purchases"],
        &summary
            .segments
            .iter()
            .map(|s| {
                vec![
                    s.segment.to_string(),
                    format_thousands(s.customers as u64),
                    format_currency(s.total_revenue),
                    format_currency_cents(s.average_spend),
                    format_decimal(s.average_purchases, 1),
                ]
            })
            .collect::<Vec<_>>(),
    ));

    if summary.filtered_rows == 0 {
        out.push(String::new());
        out.push(colorize(
            "No transactions match the selected filters.",
            Colors::YELLOW,
        ));
    }

    out.join("\n")
}

pub fn display_dashboard_written(path: &Path, summary: &DashboardSummary) {
    println!(
        "{}{} {}",
        emoji("📊"),
        colorize("Dashboard written to", Colors::BRIGHT_GREEN),
        colorize(&path.display().to_string(), Colors::CYAN)
    );
    println!(
        "   {} of {} transactions, {}",
        format_thousands(summary.filtered_rows as u64),
        format_thousands(summary.total_rows as u64),
        summary.filter.describe()
    );
}

pub fn display_server_start(addr: SocketAddr, transactions: usize) {
    println!(
        "{}{} {}",
        emoji("🚀"),
        colorize("Dashboard available at", Colors::BRIGHT_GREEN),
        colorize(&format!("http://{addr}"), Colors::CYAN)
    );
    println!(
        "   Serving {} transactions. Press Ctrl+C to stop.",
        format_thousands(transactions as u64)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Dataset, TransactionFilter};
    use crate::core::types::Granularity;
    use crate::generation::{Generator, GeneratorSettings, derive_customers};
    use crate::ui::color::supports_formatting;
    use chrono::NaiveDate;

    fn sample() -> (Vec<Transaction>, Vec<Customer>) {
        let transactions = Generator::new(GeneratorSettings {
            transactions: 50,
            customer_pool: 10,
            seed: 1,
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            history_days: 60,
        })
        .unwrap()
        .generate_transactions();
        let customers = derive_customers(&transactions);
        (transactions, customers)
    }

    fn summary(filter: TransactionFilter) -> DashboardSummary {
        let (transactions, customers) = sample();
        DashboardSummary::build(
            &Dataset::new(transactions, customers),
            &filter,
            Granularity::Month,
            3,
        )
    }

    #[test]
    fn test_render_table_alignment() {
        let table = render_table(
            &["Name", "Value"],
            &[
                vec!["a".to_string(), "1".to_string()],
                vec!["longer".to_string(), "1,000".to_string()],
            ],
        );
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "Name    Value");
        assert_eq!(lines[1], "------  -----");
        assert_eq!(lines[2], "a           1");
        assert_eq!(lines[3], "longer  1,000");
    }

    #[test]
    fn test_generation_summary_shows_preview_and_shapes() {
        let (transactions, customers) = sample();
        let paths = DataPaths::in_dir("data");
        let text = format_generation_summary(&transactions, &customers, &paths);

        assert!(text.contains("Transactions: (50, 11)"));
        assert!(text.contains(&format!("Customers: ({}, 5)", customers.len())));
        assert!(text.contains(&transactions[0].transaction_id));
        assert!(!text.contains(&transactions[files::PREVIEW_ROWS].transaction_id));
    }

    #[test]
    fn test_text_analysis_sections() {
        let text = format_analysis(&summary(TransactionFilter::default()), output_formats::TEXT)
            .unwrap();
        assert!(text.contains("Key Metrics"));
        assert!(text.contains("Sales by Category"));
        assert!(text.contains("Top 3 Products"));
        assert!(text.contains("Customer Segments"));
        assert!(text.contains("Conversion rate"));
    }

    #[test]
    fn test_json_analysis_is_valid() {
        let text = format_analysis(&summary(TransactionFilter::default()), output_formats::JSON)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["total_rows"], 50);
        assert!(json["kpis"]["total_revenue"].is_number());
        assert!(json["top_products"].as_array().unwrap().len() <= 3);
    }

    #[test]
    fn test_minimal_analysis_is_plain() {
        let text = format_analysis(&summary(TransactionFilter::default()), output_formats::MINIMAL)
            .unwrap();
        assert!(text.starts_with("total_revenue "));
        assert!(text.lines().any(|l| l.starts_with("conversion_rate ")));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_text_analysis_has_no_escapes_without_formatting() {
        if supports_formatting() {
            return;
        }
        for summary in [
            summary(TransactionFilter::default()),
            DashboardSummary::build(
                &Dataset::default(),
                &TransactionFilter::default(),
                Granularity::Month,
                3,
            ),
        ] {
            let text = format_analysis(&summary, output_formats::TEXT).unwrap();
            assert!(!text.contains('\x1b'), "{text}");
            assert!(text.starts_with("Key Metrics"));
        }
    }

    #[test]
    fn test_empty_selection_notice() {
        let filter = TransactionFilter {
            region: Some("Atlantis".to_string()),
            ..Default::default()
        };
        let text = format_analysis(&summary(filter), output_formats::TEXT).unwrap();
        assert!(text.contains("No transactions match the selected filters."));
    }
}
