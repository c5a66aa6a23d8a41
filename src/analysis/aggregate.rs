use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::core::types::{Category, Customer, PaymentMethod, Segment, Transaction, round_cents};

/// Headline metrics of a set of transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_transactions: usize,
    pub average_order_value: f64,
    pub total_customers: usize,
    pub total_products_sold: u64,
    /// Share of completed transactions, in percent
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySales {
    pub category: Category,
    pub revenue: f64,
    pub transactions: usize,
    pub units_sold: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSales {
    pub region: String,
    pub revenue: f64,
    pub transactions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
    pub product: String,
    pub category: Category,
    pub revenue: f64,
    pub units_sold: u64,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentStats {
    pub segment: Segment,
    pub customers: usize,
    pub total_revenue: f64,
    pub average_spend: f64,
    pub average_purchases: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSales {
    pub payment_method: PaymentMethod,
    pub revenue: f64,
    pub transactions: usize,
    /// Share of completed transactions paid this way, in percent
    pub share: f64,
}

/// Running totals for one group
#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    revenue: f64,
    transactions: usize,
    units: u64,
}

impl Totals {
    fn add(&mut self, t: &Transaction) {
        self.revenue += t.total_amount;
        self.transactions += 1;
        self.units += u64::from(t.quantity);
    }
}

fn completed<'a>(rows: &'a [&'a Transaction]) -> impl Iterator<Item = &'a Transaction> + 'a {
    rows.iter().copied().filter(|t| t.is_completed())
}

fn group_completed<'a, K, F>(rows: &'a [&'a Transaction], key: F) -> FxHashMap<K, Totals>
where
    K: std::hash::Hash + Eq,
    F: Fn(&'a Transaction) -> K,
{
    let mut groups: FxHashMap<K, Totals> = FxHashMap::default();
    for t in completed(rows) {
        groups.entry(key(t)).or_default().add(t);
    }
    groups
}

/// Revenue descending, then label ascending
fn by_revenue_then_label(a_rev: f64, a_label: &str, b_rev: f64, b_label: &str) -> Ordering {
    b_rev.total_cmp(&a_rev).then_with(|| a_label.cmp(b_label))
}

pub fn calculate_kpis(rows: &[&Transaction]) -> Kpis {
    let mut totals = Totals::default();
    for t in completed(rows) {
        totals.add(t);
    }

    let customers: HashSet<&str> = rows.iter().map(|t| t.customer_id.as_str()).collect();

    let average_order_value = if totals.transactions == 0 {
        0.0
    } else {
        round_cents(totals.revenue / totals.transactions as f64)
    };
    let conversion_rate = if rows.is_empty() {
        0.0
    } else {
        totals.transactions as f64 / rows.len() as f64 * 100.0
    };

    Kpis {
        total_revenue: round_cents(totals.revenue),
        total_transactions: totals.transactions,
        average_order_value,
        total_customers: customers.len(),
        total_products_sold: totals.units,
        conversion_rate,
    }
}

pub fn sales_by_category(rows: &[&Transaction]) -> Vec<CategorySales> {
    let mut sales: Vec<CategorySales> = group_completed(rows, |t| t.category)
        .into_iter()
        .map(|(category, totals)| CategorySales {
            category,
            revenue: round_cents(totals.revenue),
            transactions: totals.transactions,
            units_sold: totals.units,
        })
        .collect();
    sales.sort_by(|a, b| {
        by_revenue_then_label(a.revenue, a.category.label(), b.revenue, b.category.label())
    });
    sales
}

pub fn sales_by_region(rows: &[&Transaction]) -> Vec<RegionSales> {
    let mut sales: Vec<RegionSales> = group_completed(rows, |t| t.region.as_str())
        .into_iter()
        .map(|(region, totals)| RegionSales {
            region: region.to_string(),
            revenue: round_cents(totals.revenue),
            transactions: totals.transactions,
        })
        .collect();
    sales.sort_by(|a, b| by_revenue_then_label(a.revenue, &a.region, b.revenue, &b.region));
    sales
}

/// Best selling products by revenue, at most `n` of them
pub fn top_products(rows: &[&Transaction], n: usize) -> Vec<ProductSales> {
    let mut products: Vec<ProductSales> =
        group_completed(rows, |t| (t.product.as_str(), t.category))
            .into_iter()
            .map(|((product, category), totals)| ProductSales {
                product: product.to_string(),
                category,
                revenue: round_cents(totals.revenue),
                units_sold: totals.units,
                orders: totals.transactions,
            })
            .collect();
    products.sort_by(|a, b| {
        by_revenue_then_label(a.revenue, &a.product, b.revenue, &b.product)
            .then_with(|| a.category.label().cmp(b.category.label()))
    });
    products.truncate(n);
    products
}

pub fn payment_methods(rows: &[&Transaction]) -> Vec<PaymentSales> {
    let groups = group_completed(rows, |t| t.payment_method);
    let completed_count: usize = groups.values().map(|totals| totals.transactions).sum();

    let mut sales: Vec<PaymentSales> = groups
        .into_iter()
        .map(|(payment_method, totals)| PaymentSales {
            payment_method,
            revenue: round_cents(totals.revenue),
            transactions: totals.transactions,
            share: totals.transactions as f64 / completed_count as f64 * 100.0,
        })
        .collect();
    sales.sort_by(|a, b| {
        by_revenue_then_label(
            a.revenue,
            a.payment_method.label(),
            b.revenue,
            b.payment_method.label(),
        )
    });
    sales
}

/// Per-segment statistics over the whole customer table, Premium first.
/// Segments without customers are left out.
pub fn customer_segments(customers: &[Customer]) -> Vec<SegmentStats> {
    Segment::ALL
        .into_iter()
        .filter_map(|segment| {
            let members: Vec<&Customer> =
                customers.iter().filter(|c| c.segment == segment).collect();
            if members.is_empty() {
                return None;
            }
            let count = members.len() as f64;
            let total: f64 = members.iter().map(|c| c.total_spent).sum();
            let purchases: u64 = members.iter().map(|c| u64::from(c.total_purchases)).sum();
            Some(SegmentStats {
                segment,
                customers: members.len(),
                total_revenue: round_cents(total),
                average_spend: round_cents(total / count),
                average_purchases: purchases as f64 / count,
            })
        })
        .collect()
}
