//! Spending aggregation
//!
//! Pure functions from a transaction slice to ranked spending groups. No
//! I/O and no clock access; the date window arrives pre-resolved in the
//! options, so the same inputs always produce the same output.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::daterange::{filter_by_range, parse_date};
use crate::models::{AggregateOptions, DateRange, GroupMode, SpendingCategory, Transaction};

/// Group transactions into ranked spending totals.
///
/// Applies the date window, groups by retailer or category, drops groups
/// below the minimum total, sorts by amount descending and keeps the top N.
/// Groups with equal totals stay in first-seen order.
pub fn aggregate(transactions: &[Transaction], options: &AggregateOptions) -> Vec<SpendingCategory> {
    let windowed = filter_by_range(transactions, options.date_range.as_ref());

    let excluded: HashSet<&str> = options.exclude_names.iter().map(String::as_str).collect();

    // Vec keeps first-seen order; the map is just an index into it.
    let mut groups: Vec<SpendingCategory> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for t in &windowed {
        let key: &str = match options.mode {
            GroupMode::Retailer => &t.description,
            GroupMode::Category => t.category.as_deref().unwrap_or(""),
        };
        if key.is_empty() || excluded.contains(key) {
            continue;
        }

        match index.get(key) {
            Some(&i) => {
                groups[i].amount += t.amount;
                groups[i].transaction_count += 1;
            }
            None => {
                index.insert(key.to_string(), groups.len());
                groups.push(SpendingCategory {
                    name: key.to_string(),
                    amount: t.amount,
                    transaction_count: 1,
                });
            }
        }
    }

    groups.retain(|g| g.amount >= options.min_amount);
    // Stable sort, so equal totals keep their first-seen order
    groups.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    groups.truncate(options.top_n);
    groups
}

/// Sum of all transaction amounts, with no filtering applied
pub fn total_spending(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|t| t.amount).sum()
}

/// Earliest and latest parseable transaction dates, or None when no date
/// parses
pub fn observed_span(transactions: &[Transaction]) -> Option<DateRange> {
    let mut dates = transactions.iter().filter_map(|t| parse_date(&t.date));
    let first = dates.next()?;
    let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(DateRange::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(date: &str, description: &str, amount: f64) -> Transaction {
        Transaction {
            date: date.to_string(),
            description: description.to_string(),
            amount,
            category: None,
            account: None,
            memo: None,
        }
    }

    fn tx_cat(date: &str, description: &str, amount: f64, category: &str) -> Transaction {
        Transaction {
            category: Some(category.to_string()),
            ..tx(date, description, amount)
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_groups_by_retailer_with_sums_and_counts() {
        let transactions = vec![
            tx("2024-01-05", "Amazon", 120.50),
            tx("2024-01-12", "Starbucks", 5.75),
            tx("2024-02-03", "Amazon", 45.25),
            tx("2024-02-20", "Amazon", 89.99),
            tx("2024-03-01", "Starbucks", 6.25),
        ];

        let result = aggregate(&transactions, &AggregateOptions::default());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Amazon");
        assert!(approx(result[0].amount, 255.74));
        assert_eq!(result[0].transaction_count, 3);
        assert_eq!(result[1].name, "Starbucks");
        assert!(approx(result[1].amount, 12.00));
        assert_eq!(result[1].transaction_count, 2);
    }

    #[test]
    fn test_category_mode_groups_by_category() {
        let transactions = vec![
            tx_cat("2024-01-05", "Amazon", 50.0, "Shopping"),
            tx_cat("2024-01-06", "Target", 30.0, "Shopping"),
            tx_cat("2024-01-07", "Shell", 40.0, "Gas"),
            tx("2024-01-08", "Mystery Store", 99.0),
        ];

        let options = AggregateOptions {
            mode: GroupMode::Category,
            ..AggregateOptions::default()
        };
        let result = aggregate(&transactions, &options);

        // The uncategorized transaction contributes to no group
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Shopping");
        assert!(approx(result[0].amount, 80.0));
        assert_eq!(result[1].name, "Gas");
    }

    #[test]
    fn test_exclude_names_removes_exact_matches() {
        let transactions = vec![
            tx("2024-01-05", "Amazon", 100.0),
            tx("2024-01-06", "Target", 80.0),
            tx("2024-01-07", "Amazon", 20.0),
        ];

        let options = AggregateOptions {
            exclude_names: vec!["Amazon".to_string()],
            ..AggregateOptions::default()
        };
        let result = aggregate(&transactions, &options);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Target");
    }

    #[test]
    fn test_min_amount_boundary_keeps_equal_totals() {
        let transactions = vec![
            tx("2024-01-05", "ExactlyAt", 50.0),
            tx("2024-01-06", "JustUnder", 49.99),
            tx("2024-01-07", "Above", 50.01),
        ];

        let options = AggregateOptions {
            min_amount: 50.0,
            ..AggregateOptions::default()
        };
        let result = aggregate(&transactions, &options);
        let names: Vec<&str> = result.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Above", "ExactlyAt"]);
    }

    #[test]
    fn test_top_n_truncates_after_sorting() {
        let transactions = vec![
            tx("2024-01-05", "Small", 10.0),
            tx("2024-01-06", "Large", 300.0),
            tx("2024-01-07", "Medium", 100.0),
        ];

        let options = AggregateOptions {
            top_n: 2,
            ..AggregateOptions::default()
        };
        let result = aggregate(&transactions, &options);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Large");
        assert_eq!(result[1].name, "Medium");
    }

    #[test]
    fn test_equal_totals_stay_in_first_seen_order() {
        let transactions = vec![
            tx("2024-01-05", "Beta", 75.0),
            tx("2024-01-06", "Alpha", 75.0),
            tx("2024-01-07", "Gamma", 75.0),
        ];

        let result = aggregate(&transactions, &AggregateOptions::default());
        let names: Vec<&str> = result.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha", "Gamma"]);
    }

    #[test]
    fn test_date_window_is_applied_before_grouping() {
        let transactions = vec![
            tx("2024-01-15", "Amazon", 100.0),
            tx("2024-06-15", "Amazon", 50.0),
            tx("not-a-date", "Amazon", 999.0),
        ];

        let options = AggregateOptions {
            date_range: Some(DateRange::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            )),
            ..AggregateOptions::default()
        };
        let result = aggregate(&transactions, &options);
        assert_eq!(result.len(), 1);
        assert!(approx(result[0].amount, 100.0));
        assert_eq!(result[0].transaction_count, 1);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let transactions = vec![
            tx("2024-01-05", "A", 10.0),
            tx("2024-01-06", "B", 10.0),
            tx("2024-01-07", "C", 20.0),
            tx("2024-01-08", "A", 5.0),
        ];

        let first = aggregate(&transactions, &AggregateOptions::default());
        let second = aggregate(&transactions, &AggregateOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_lookahead_returns_next_unguessed_group() {
        let transactions = vec![
            tx("2024-01-05", "Amazon", 300.0),
            tx("2024-01-06", "Target", 200.0),
            tx("2024-01-07", "Costco", 100.0),
        ];

        let options = AggregateOptions {
            top_n: 1,
            exclude_names: vec!["Amazon".to_string(), "Target".to_string()],
            ..AggregateOptions::default()
        };
        let result = aggregate(&transactions, &options);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Costco");

        let options = AggregateOptions {
            top_n: 1,
            exclude_names: vec![
                "Amazon".to_string(),
                "Target".to_string(),
                "Costco".to_string(),
            ],
            ..AggregateOptions::default()
        };
        assert!(aggregate(&transactions, &options).is_empty());
    }

    #[test]
    fn test_min_amount_then_lookahead_walks_remaining_groups() {
        let transactions = vec![
            tx("2024-01-05", "Amazon", 40.0),
            tx("2024-01-10", "Amazon", 30.0),
            tx("2024-01-15", "Starbucks", 5.0),
        ];

        let options = AggregateOptions {
            min_amount: 50.0,
            ..AggregateOptions::default()
        };
        let result = aggregate(&transactions, &options);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Amazon");
        assert!(approx(result[0].amount, 70.0));
        assert_eq!(result[0].transaction_count, 2);

        // With Amazon revealed and no minimum, the look-ahead finds what is left
        let options = AggregateOptions {
            top_n: 1,
            exclude_names: vec!["Amazon".to_string()],
            ..AggregateOptions::default()
        };
        let remaining = aggregate(&transactions, &options);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Starbucks");
        assert!(approx(remaining[0].amount, 5.0));
        assert_eq!(remaining[0].transaction_count, 1);
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert!(aggregate(&[], &AggregateOptions::default()).is_empty());
    }

    #[test]
    fn test_total_spending_sums_everything() {
        let transactions = vec![
            tx("2024-01-05", "A", 10.50),
            tx("2024-01-06", "B", 20.25),
            tx("bad-date", "C", 5.00),
        ];
        assert!(approx(total_spending(&transactions), 35.75));
        assert!(approx(total_spending(&[]), 0.0));
    }

    #[test]
    fn test_observed_span_covers_min_and_max() {
        let transactions = vec![
            tx("2024-06-15", "A", 1.0),
            tx("2024-01-03", "B", 2.0),
            tx("garbage", "C", 3.0),
            tx("2024-11-30", "D", 4.0),
        ];
        let span = observed_span(&transactions).unwrap();
        assert_eq!(span.start, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(span.end, NaiveDate::from_ymd_opt(2024, 11, 30).unwrap());
    }

    #[test]
    fn test_observed_span_none_without_parseable_dates() {
        assert!(observed_span(&[]).is_none());
        assert!(observed_span(&[tx("??", "A", 1.0)]).is_none());
    }
}
