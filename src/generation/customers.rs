use rustc_hash::FxHashMap;

use crate::core::types::{Customer, Segment, Transaction, round_cents};

/// Build one customer record per distinct customer id.
///
/// Customers come out in order of first appearance in `transactions`.
/// Purchases count every transaction, spend only counts completed ones.
pub fn derive_customers(transactions: &[Transaction]) -> Vec<Customer> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut customers: Vec<Customer> = Vec::new();

    for t in transactions {
        match index.get(t.customer_id.as_str()) {
            Some(&slot) => {
                let customer = &mut customers[slot];
                customer.total_purchases += 1;
                customer.total_spent += t.total_amount;
                if t.date < customer.first_purchase_date {
                    customer.first_purchase_date = t.date;
                }
            }
            None => {
                index.insert(t.customer_id.as_str(), customers.len());
                customers.push(Customer {
                    customer_id: t.customer_id.clone(),
                    first_purchase_date: t.date,
                    total_purchases: 1,
                    total_spent: t.total_amount,
                    segment: Segment::Occasional,
                });
            }
        }
    }

    for customer in &mut customers {
        customer.total_spent = round_cents(customer.total_spent);
        customer.segment = Segment::from_total_spent(customer.total_spent);
    }

    customers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Category, PaymentMethod, TransactionStatus};
    use chrono::NaiveDate;

    fn txn(id: &str, customer: &str, day: u32, amount: f64, status: TransactionStatus) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            customer_id: customer.to_string(),
            category: Category::Electronics,
            product: "Laptop".to_string(),
            quantity: 1,
            unit_price: amount,
            total_amount: if status.is_completed() { amount } else { 0.0 },
            region: "Bretagne".to_string(),
            payment_method: PaymentMethod::PayPal,
            status,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(derive_customers(&[]).is_empty());
    }

    #[test]
    fn test_aggregates_per_customer() {
        let rows = vec![
            txn("TXN_000001", "CUST_0002", 3, 1500.0, TransactionStatus::Completed),
            txn("TXN_000002", "CUST_0001", 4, 100.0, TransactionStatus::Completed),
            txn("TXN_000003", "CUST_0002", 5, 600.0, TransactionStatus::Completed),
            txn("TXN_000004", "CUST_0001", 6, 999.0, TransactionStatus::Refunded),
        ];

        let customers = derive_customers(&rows);
        assert_eq!(customers.len(), 2);

        assert_eq!(customers[0].customer_id, "CUST_0002");
        assert_eq!(customers[0].total_purchases, 2);
        assert_eq!(customers[0].total_spent, 2100.0);
        assert_eq!(customers[0].segment, Segment::Premium);
        assert_eq!(
            customers[0].first_purchase_date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );

        assert_eq!(customers[1].customer_id, "CUST_0001");
        assert_eq!(customers[1].total_purchases, 2);
        assert_eq!(customers[1].total_spent, 100.0);
        assert_eq!(customers[1].segment, Segment::Occasional);
    }

    #[test]
    fn test_first_purchase_is_earliest_even_if_unsorted() {
        let rows = vec![
            txn("TXN_000001", "CUST_0001", 20, 10.0, TransactionStatus::Completed),
            txn("TXN_000002", "CUST_0001", 2, 10.0, TransactionStatus::Cancelled),
        ];
        let customers = derive_customers(&rows);
        assert_eq!(
            customers[0].first_purchase_date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_totals_match_completed_revenue() {
        let rows = vec![
            txn("TXN_000001", "CUST_0001", 1, 0.1, TransactionStatus::Completed),
            txn("TXN_000002", "CUST_0001", 2, 0.2, TransactionStatus::Completed),
            txn("TXN_000003", "CUST_0003", 2, 501.0, TransactionStatus::Completed),
        ];
        let customers = derive_customers(&rows);
        assert_eq!(customers[0].total_spent, 0.3);
        assert_eq!(customers[1].segment, Segment::Regular);
    }
}
