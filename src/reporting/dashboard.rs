use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::constants::{display, filters, limits};
use crate::core::error::Result;
use crate::core::types::Granularity;
use crate::reporting::summary::{DashboardSummary, FilterOptions};
use crate::ui::format::{
    format_currency, format_currency_cents, format_decimal, format_percent, format_thousands,
};

/// Constants for dashboard styling and layout
mod dashboard_constants {
    /// Chart.js CDN URL for rendering charts
    pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

    /// Conversion rate thresholds for styling
    pub const SUCCESS_THRESHOLD: f64 = 90.0;
    pub const WARNING_THRESHOLD: f64 = 70.0;
}

/// Data structure containing all information needed for dashboard generation
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// Aggregates for the active filter selection
    pub summary: DashboardSummary,
    /// Filter form controls; only rendered when the page is served
    pub options: Option<FilterOptions>,
    /// Where the transactions were read from
    pub data_source: String,
    /// Timestamp when the dashboard was generated
    pub timestamp: String,
}

#[derive(Debug, Default, Serialize)]
struct ChartSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl ChartSeries {
    fn from_pairs<I: IntoIterator<Item = (String, f64)>>(pairs: I) -> Self {
        let (labels, values) = pairs.into_iter().unzip();
        Self { labels, values }
    }
}

/// Everything the chart script needs, embedded as JSON
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartData {
    categories: ChartSeries,
    regions: ChartSeries,
    time_series: ChartSeries,
    payments: ChartSeries,
    products: ChartSeries,
    segments: ChartSeries,
}

/// HTML dashboard generator for sales summaries
pub struct HtmlDashboard;

impl HtmlDashboard {
    /// Generate and write an HTML dashboard to the specified path
    pub fn generate_dashboard(data: &DashboardData, output_path: &Path) -> Result<()> {
        let html_content = Self::render(data)?;
        if let Some(parent) = output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, html_content)?;
        Ok(())
    }

    /// Render the complete HTML document
    pub fn render(data: &DashboardData) -> Result<String> {
        Self::generate_html_content(data)
    }

    fn generate_html_content(data: &DashboardData) -> Result<String> {
        let css_styles = Self::generate_css();
        let js_scripts = Self::generate_javascript();
        let body_content = Self::generate_body_content(data)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sales Dashboard - salesboard</title>
    <script src="{}"></script>
    <style>{}</style>
</head>
<body>
    {}
    <script>{}</script>
</body>
</html>"#,
            dashboard_constants::CHART_JS_CDN,
            css_styles,
            body_content,
            js_scripts
        ))
    }

    fn generate_css() -> &'static str {
        r#"
        :root {
            --primary-color: #1f77b4;
            --success-color: #059669;
            --warning-color: #d97706;
            --error-color: #dc2626;
            --bg-color: #f0f2f6;
            --card-bg: #ffffff;
            --border-color: #e2e8f0;
            --text-primary: #1e293b;
            --text-secondary: #64748b;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: var(--bg-color);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .container {
            max-width: 1280px;
            margin: 0 auto;
            padding: 2rem;
        }

        .header {
            text-align: center;
            margin-bottom: 2rem;
            padding: 2rem;
            background: linear-gradient(135deg, var(--primary-color), #3b82f6);
            color: white;
            border-radius: 12px;
            box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1);
        }

        .header h1 {
            font-size: 2.5rem;
            margin-bottom: 0.5rem;
            font-weight: 700;
        }

        .header p {
            font-size: 1.05rem;
            opacity: 0.9;
        }

        .filters {
            display: flex;
            flex-wrap: wrap;
            gap: 1rem;
            align-items: flex-end;
            background: var(--card-bg);
            padding: 1.25rem 1.5rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            margin-bottom: 2rem;
        }

        .filters label {
            display: flex;
            flex-direction: column;
            font-size: 0.8rem;
            color: var(--text-secondary);
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }

        .filters input, .filters select {
            margin-top: 0.25rem;
            padding: 0.4rem 0.6rem;
            border: 1px solid var(--border-color);
            border-radius: 6px;
            font-size: 0.95rem;
        }

        .filters button {
            padding: 0.5rem 1.25rem;
            border: none;
            border-radius: 6px;
            background: var(--primary-color);
            color: white;
            font-weight: 600;
            cursor: pointer;
        }

        .filters a { color: var(--text-secondary); font-size: 0.9rem; }

        .stats-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
            gap: 1.5rem;
            margin-bottom: 2rem;
        }

        .stat-card {
            background: var(--card-bg);
            padding: 1.5rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
            transition: transform 0.2s, box-shadow 0.2s;
        }

        .stat-card:hover {
            transform: translateY(-2px);
            box-shadow: 0 4px 12px -1px rgba(0, 0, 0, 0.15);
        }

        .stat-icon {
            width: 48px;
            height: 48px;
            border-radius: 12px;
            display: flex;
            align-items: center;
            justify-content: center;
            margin-bottom: 1rem;
            font-size: 1.5rem;
        }

        .stat-value {
            font-size: 1.6rem;
            font-weight: 700;
            margin-bottom: 0.5rem;
        }

        .stat-label {
            color: var(--text-secondary);
            font-size: 0.85rem;
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }

        .success { color: var(--success-color); background-color: #ecfdf5; }
        .warning { color: var(--warning-color); background-color: #fffbeb; }
        .error { color: var(--error-color); background-color: #fef2f2; }
        .info { color: var(--primary-color); background-color: #eff6ff; }

        .notice {
            padding: 1rem 1.5rem;
            margin-bottom: 2rem;
            border-radius: 12px;
        }

        .chart-row {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(420px, 1fr));
            gap: 2rem;
        }

        .chart-container {
            background: var(--card-bg);
            padding: 2rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            margin-bottom: 2rem;
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
        }

        .chart-title {
            font-size: 1.25rem;
            font-weight: 600;
            margin-bottom: 1rem;
            color: var(--text-primary);
        }

        table {
            width: 100%;
            border-collapse: collapse;
            margin-top: 1.5rem;
            font-size: 0.9rem;
        }

        th, td {
            padding: 0.5rem 0.75rem;
            border-bottom: 1px solid var(--border-color);
            text-align: left;
        }

        th {
            color: var(--text-secondary);
            font-weight: 600;
            text-transform: uppercase;
            font-size: 0.75rem;
            letter-spacing: 0.5px;
        }

        td.num, th.num { text-align: right; }

        .footer {
            text-align: center;
            color: var(--text-secondary);
            font-size: 0.85rem;
            padding: 1rem 0 2rem;
        }

        @media (max-width: 768px) {
            .container { padding: 1rem; }
            .header h1 { font-size: 2rem; }
            .stats-grid { grid-template-columns: 1fr 1fr; }
            .chart-row { grid-template-columns: 1fr; }
            .chart-container { padding: 1rem; }
        }
        "#
    }

    /// Generate the main body content of the dashboard
    fn generate_body_content(data: &DashboardData) -> Result<String> {
        let header_section = Self::generate_header_section(data);
        let filter_section = data
            .options
            .as_ref()
            .map(|options| Self::generate_filter_section(&data.summary, options))
            .unwrap_or_default();
        let stats_section = Self::generate_stats_section(&data.summary);
        let charts_section = Self::generate_charts_section(&data.summary)?;
        let footer_section = Self::generate_footer_section(&data.data_source);

        Ok(format!(
            r#"
            <div class="container">
                {}
                {}
                {}
                {}
                {}
            </div>
            "#,
            header_section, filter_section, stats_section, charts_section, footer_section
        ))
    }

    /// Generate the dashboard header section
    fn generate_header_section(data: &DashboardData) -> String {
        let summary = &data.summary;
        format!(
            r#"
            <div class="header">
                <h1>📊 E-commerce Sales Dashboard</h1>
                <p>Generated on {} by salesboard</p>
                <p>Filters: {} &middot; showing {} of {} transactions</p>
            </div>
            "#,
            escape_html(&data.timestamp),
            escape_html(&summary.filter.describe()),
            format_thousands(summary.filtered_rows as u64),
            format_thousands(summary.total_rows as u64)
        )
    }

    /// Generate the filter form submitted back to the server as a GET request
    fn generate_filter_section(summary: &DashboardSummary, options: &FilterOptions) -> String {
        let filter = &summary.filter;
        let date_attr = |name: &str, value: Option<chrono::NaiveDate>| {
            value
                .map(|d| format!(r#" {name}="{d}""#))
                .unwrap_or_default()
        };
        let start_value = filter.start.or(options.min_date);
        let end_value = filter.end.or(options.max_date);
        let bounds = format!(
            "{}{}",
            date_attr("min", options.min_date),
            date_attr("max", options.max_date)
        );

        let category_options = std::iter::once(Self::select_option(
            filters::ALL_OPTION,
            filters::ALL_OPTION,
            filter.category.is_none(),
        ))
        .chain(options.categories.iter().map(|category| {
            Self::select_option(category.slug(), category.label(), filter.category == Some(*category))
        }))
        .collect::<String>();

        let region_options = std::iter::once(Self::select_option(
            filters::ALL_OPTION,
            filters::ALL_OPTION,
            filter.region.is_none(),
        ))
        .chain(options.regions.iter().map(|region| {
            Self::select_option(region, region, filter.region.as_deref() == Some(region.as_str()))
        }))
        .collect::<String>();

        let granularity_options = Granularity::ALL
            .iter()
            .map(|g| Self::select_option(g.as_str(), g.as_str(), *g == summary.granularity))
            .collect::<String>();

        format!(
            r#"
            <form class="filters" method="get" action="/">
                <label>From<input type="date" name="start"{bounds}{}></label>
                <label>To<input type="date" name="end"{bounds}{}></label>
                <label>Category<select name="category">{category_options}</select></label>
                <label>Region<select name="region">{region_options}</select></label>
                <label>Granularity<select name="granularity">{granularity_options}</select></label>
                <label>Top products<input type="number" name="top" min="{}" max="{}" value="{}"></label>
                <button type="submit">Apply</button>
                <a href="/">Reset</a>
            </form>
            "#,
            date_attr("value", start_value),
            date_attr("value", end_value),
            limits::DASHBOARD_TOP_MIN,
            limits::DASHBOARD_TOP_MAX,
            summary.top_n
        )
    }

    fn select_option(value: &str, label: &str, selected: bool) -> String {
        format!(
            r#"<option value="{}"{}>{}</option>"#,
            escape_html(value),
            if selected { " selected" } else { "" },
            escape_html(label)
        )
    }

    /// Generate the KPI cards section
    fn generate_stats_section(summary: &DashboardSummary) -> String {
        let kpis = &summary.kpis;
        let conversion_style = Self::get_conversion_style(kpis.conversion_rate);
        let empty_notice = if summary.filtered_rows == 0 {
            r#"<div class="notice warning">No transactions match the selected filters.</div>"#
        } else {
            ""
        };

        format!(
            r#"
            {}
            <div class="stats-grid">
                {}
                {}
                {}
                {}
                {}
                {}
            </div>
            "#,
            empty_notice,
            Self::generate_stat_card(
                display::REVENUE_EMOJI,
                &format_currency(kpis.total_revenue),
                "Revenue",
                "info"
            ),
            Self::generate_stat_card(
                display::TRANSACTIONS_EMOJI,
                &format_thousands(kpis.total_transactions as u64),
                "Transactions",
                "info"
            ),
            Self::generate_stat_card(
                display::BASKET_EMOJI,
                &format_currency_cents(kpis.average_order_value),
                "Average Basket",
                "info"
            ),
            Self::generate_stat_card(
                display::CUSTOMERS_EMOJI,
                &format_thousands(kpis.total_customers as u64),
                "Customers",
                "info"
            ),
            Self::generate_stat_card(
                display::UNITS_EMOJI,
                &format_thousands(kpis.total_products_sold),
                "Products Sold",
                "info"
            ),
            Self::generate_stat_card(
                display::CONVERSION_EMOJI,
                &format_percent(kpis.conversion_rate),
                "Conversion Rate",
                conversion_style
            ),
        )
    }

    /// Get CSS class for conversion rate styling based on thresholds
    fn get_conversion_style(rate: f64) -> &'static str {
        if rate >= dashboard_constants::SUCCESS_THRESHOLD {
            "success"
        } else if rate >= dashboard_constants::WARNING_THRESHOLD {
            "warning"
        } else {
            "error"
        }
    }

    /// Generate a single statistics card
    fn generate_stat_card(icon: &str, value: &str, label: &str, style_class: &str) -> String {
        format!(
            r#"
            <div class="stat-card">
                <div class="stat-icon {}">{}</div>
                <div class="stat-value">{}</div>
                <div class="stat-label">{}</div>
            </div>
            "#,
            style_class, icon, value, label
        )
    }

    /// Generate every chart panel with its table, plus the embedded chart data
    fn generate_charts_section(summary: &DashboardSummary) -> Result<String> {
        let chart_data_json = script_safe_json(&Self::chart_data(summary))?;

        let category_table = Self::generate_table(
            &["Category", "Revenue", "Transactions", "Units"],
            summary
                .categories
                .iter()
                .map(|c| {
                    vec![
                        escape_html(c.category.label()),
                        format_currency(c.revenue),
                        format_thousands(c.transactions as u64),
                        format_thousands(c.units_sold),
                    ]
                })
                .collect(),
        );
        let region_table = Self::generate_table(
            &["Region", "Revenue", "Transactions"],
            summary
                .regions
                .iter()
                .map(|r| {
                    vec![
                        escape_html(&r.region),
                        format_currency(r.revenue),
                        format_thousands(r.transactions as u64),
                    ]
                })
                .collect(),
        );
        let payment_table = Self::generate_table(
            &["Payment Method", "Revenue", "Transactions", "Share"],
            summary
                .payment_methods
                .iter()
                .map(|p| {
                    vec![
                        escape_html(p.payment_method.label()),
                        format_currency(p.revenue),
                        format_thousands(p.transactions as u64),
                        format_percent(p.share),
                    ]
                })
                .collect(),
        );
        let product_table = Self::generate_table(
            &["Product", "Category", "Revenue", "Units", "Orders"],
            summary
                .top_products
                .iter()
                .map(|p| {
                    vec![
                        escape_html(&p.product),
                        escape_html(p.category.label()),
                        format_currency(p.revenue),
                        format_thousands(p.units_sold),
                        format_thousands(p.orders as u64),
                    ]
                })
                .collect(),
        );
        let segment_table = Self::generate_table(
            &["Segment", "Customers", "Revenue", "Average Spend", "Average Purchases"],
            summary
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
                .collect(),
        );

        Ok(format!(
            r#"
            <div class="chart-row">
                <div class="chart-container">
                    <h3 class="chart-title">Revenue by Category</h3>
                    <canvas id="categoryChart" height="260"></canvas>
                    {category_table}
                </div>
                <div class="chart-container">
                    <h3 class="chart-title">Revenue by Region</h3>
                    <canvas id="regionChart" height="260"></canvas>
                    {region_table}
                </div>
            </div>

            <div class="chart-container">
                <h3 class="chart-title">Revenue over Time ({granularity})</h3>
                <canvas id="timeChart" height="110"></canvas>
            </div>

            <div class="chart-row">
                <div class="chart-container">
                    <h3 class="chart-title">Payment Methods</h3>
                    <canvas id="paymentChart" height="260"></canvas>
                    {payment_table}
                </div>
                <div class="chart-container">
                    <h3 class="chart-title">{trophy} Top {top_n} Products</h3>
                    <canvas id="productChart" height="260"></canvas>
                    {product_table}
                </div>
            </div>

            <div class="chart-row">
                <div class="chart-container">
                    <h3 class="chart-title">Customer Segments</h3>
                    {segment_table}
                </div>
                <div class="chart-container">
                    <h3 class="chart-title">Customers per Segment</h3>
                    <canvas id="segmentChart" height="260"></canvas>
                </div>
            </div>

            <script>
                const salesData = {chart_data_json};
                window.chartData = salesData;
            </script>
            "#,
            granularity = summary.granularity,
            trophy = display::TROPHY_EMOJI,
            top_n = summary.top_n,
        ))
    }

    /// Render rows as a table; every column after the first is numeric
    fn generate_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
        if rows.is_empty() {
            return r#"<p class="stat-label">No data</p>"#.to_string();
        }

        let head = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    format!("<th>{h}</th>")
                } else {
                    format!(r#"<th class="num">{h}</th>"#)
                }
            })
            .collect::<String>();

        let body = rows
            .into_iter()
            .map(|cells| {
                let cells = cells
                    .into_iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        if i == 0 {
                            format!("<td>{cell}</td>")
                        } else {
                            format!(r#"<td class="num">{cell}</td>"#)
                        }
                    })
                    .collect::<String>();
                format!("<tr>{cells}</tr>")
            })
            .collect::<String>();

        format!("<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>")
    }

    fn generate_footer_section(data_source: &str) -> String {
        format!(
            r#"
            <div class="footer">
                {} Data source: {} &middot; salesboard v{}
            </div>
            "#,
            display::FILE_EMOJI,
            escape_html(data_source),
            env!("CARGO_PKG_VERSION")
        )
    }

    fn chart_data(summary: &DashboardSummary) -> ChartData {
        ChartData {
            categories: ChartSeries::from_pairs(
                summary
                    .categories
                    .iter()
                    .map(|c| (c.category.label().to_string(), c.revenue)),
            ),
            regions: ChartSeries::from_pairs(
                summary.regions.iter().map(|r| (r.region.clone(), r.revenue)),
            ),
            time_series: ChartSeries::from_pairs(
                summary
                    .time_series
                    .iter()
                    .map(|b| (b.period_end.to_string(), b.revenue)),
            ),
            payments: ChartSeries::from_pairs(
                summary
                    .payment_methods
                    .iter()
                    .map(|p| (p.payment_method.label().to_string(), p.revenue)),
            ),
            products: ChartSeries::from_pairs(
                summary
                    .top_products
                    .iter()
                    .map(|p| (p.product.clone(), p.revenue)),
            ),
            segments: ChartSeries::from_pairs(
                summary
                    .segments
                    .iter()
                    .map(|s| (s.segment.to_string(), s.customers as f64)),
            ),
        }
    }

    fn generate_javascript() -> &'static str {
        r#"
        document.addEventListener('DOMContentLoaded', function() {
            if (typeof Chart === 'undefined' || !window.chartData) {
                return;
            }

            const data = window.chartData;
            const palette = [
                '#1f77b4', '#ff7f0e', '#2ca02c', '#d62728',
                '#9467bd', '#8c564b', '#e377c2', '#7f7f7f'
            ];
            const euros = function(value) {
                return value.toLocaleString('en-US', { maximumFractionDigits: 0 }) + ' €';
            };
            const moneyAxis = { ticks: { callback: euros } };

            function draw(id, config) {
                const ctx = document.getElementById(id);
                if (ctx) {
                    new Chart(ctx, config);
                }
            }

            draw('categoryChart', {
                type: 'pie',
                data: {
                    labels: data.categories.labels,
                    datasets: [{ data: data.categories.values, backgroundColor: palette }]
                },
                options: { plugins: { legend: { position: 'bottom' } } }
            });

            draw('regionChart', {
                type: 'bar',
                data: {
                    labels: data.regions.labels,
                    datasets: [{ label: 'Revenue', data: data.regions.values, backgroundColor: palette }]
                },
                options: { plugins: { legend: { display: false } }, scales: { y: moneyAxis } }
            });

            draw('timeChart', {
                type: 'line',
                data: {
                    labels: data.timeSeries.labels,
                    datasets: [{
                        label: 'Revenue',
                        data: data.timeSeries.values,
                        borderColor: palette[0],
                        backgroundColor: 'rgba(31, 119, 180, 0.15)',
                        fill: true,
                        tension: 0.25
                    }]
                },
                options: { scales: { y: moneyAxis } }
            });

            draw('paymentChart', {
                type: 'bar',
                data: {
                    labels: data.payments.labels,
                    datasets: [{ label: 'Revenue', data: data.payments.values, backgroundColor: palette }]
                },
                options: { plugins: { legend: { display: false } }, scales: { y: moneyAxis } }
            });

            draw('productChart', {
                type: 'bar',
                data: {
                    labels: data.products.labels,
                    datasets: [{ label: 'Revenue', data: data.products.values, backgroundColor: palette[2] }]
                },
                options: {
                    indexAxis: 'y',
                    plugins: { legend: { display: false } },
                    scales: { x: moneyAxis }
                }
            });

            draw('segmentChart', {
                type: 'doughnut',
                data: {
                    labels: data.segments.labels,
                    datasets: [{
                        data: data.segments.values,
                        backgroundColor: ['#d4af37', '#1f77b4', '#94a3b8'],
                        borderWidth: 2,
                        borderColor: '#ffffff'
                    }]
                },
                options: { plugins: { legend: { position: 'bottom' } } }
            });
        });
        "#
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// JSON that cannot close the surrounding `<script>` element
fn script_safe_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    // `<` only ever occurs inside JSON strings, where the escape is equivalent
    Ok(json.replace('<', "\\u003c"))
}
