use std::cmp::Reverse;

use crate::ledger::types::Transaction;

/// Newest-first view of the transaction list, truncated to `limit`.
/// Rows on the same date keep later input rows first; undated rows go last.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut indexed = transactions.iter().enumerate().collect::<Vec<_>>();
    indexed.sort_by_key(|(index, transaction)| (Reverse(transaction.date), Reverse(*index)));
    indexed
        .into_iter()
        .take(limit)
        .map(|(_, transaction)| transaction.clone())
        .collect()
}

pub fn filter_by_card(transactions: &[Transaction], card_id: &str) -> Vec<Transaction> {
    let wanted = card_id.trim();
    transactions
        .iter()
        .filter(|transaction| transaction.card_id.as_deref().map(str::trim) == Some(wanted))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::ledger::types::TransactionKind::{Expense, Income};
    use crate::ledger::types::fixtures::{txn, ymd};

    use super::{filter_by_card, recent_transactions};

    #[test]
    fn recent_orders_newest_first_and_truncates() {
        let transactions = vec![
            txn(1, Income, 1.0, ymd(2024, 5, 1), None),
            txn(2, Expense, 1.0, None, None),
            txn(3, Expense, 1.0, ymd(2024, 5, 3), None),
            txn(4, Expense, 1.0, ymd(2024, 5, 3), None),
            txn(5, Expense, 1.0, ymd(2024, 5, 2), None),
        ];
        let ids = recent_transactions(&transactions, 10)
            .iter()
            .map(|transaction| transaction.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["4", "3", "5", "1", "2"]);

        assert_eq!(recent_transactions(&transactions, 2).len(), 2);
        assert!(recent_transactions(&transactions, 0).is_empty());
    }

    #[test]
    fn card_filter_keeps_order_and_matches_trimmed_ids() {
        let mut first = txn(1, Expense, 1.0, None, None);
        first.card_id = Some("card-a".to_string());
        let mut second = txn(2, Expense, 1.0, None, None);
        second.card_id = Some("card-b".to_string());
        let mut third = txn(3, Expense, 1.0, None, None);
        third.card_id = Some(" card-a ".to_string());
        let unassigned = txn(4, Expense, 1.0, None, None);

        let filtered = filter_by_card(&[first, second, third, unassigned], "card-a");
        let ids = filtered
            .iter()
            .map(|transaction| transaction.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
