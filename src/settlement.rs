use std::cmp::Reverse;

use tracing::debug;

use crate::money::{to_cents, to_dollars, Cents};
use crate::schemas::{Balance, Settlement};

/// Balances within this distance of zero count as settled.
pub const SETTLED_EPSILON: f64 = 0.01;

struct Position<'a> {
    name: &'a str,
    remaining: Cents,
}

fn positions<'a>(balances: &'a [Balance], keep: impl Fn(f64) -> bool) -> Vec<Position<'a>> {
    balances
        .iter()
        .filter(|b| keep(b.balance))
        .map(|b| Position {
            name: &b.person_name,
            remaining: to_cents(b.balance).abs(),
        })
        .collect()
}

/// Greedily matches the largest creditor with the largest debtor until one
/// side runs out.
///
/// Sorting is stable, so people with equal balances keep their input order.
/// Uses at most `creditors + debtors - 1` payments, each strictly positive.
pub fn calculate_settlements(balances: &[Balance]) -> Vec<Settlement> {
    let mut creditors = positions(balances, |b| b > SETTLED_EPSILON);
    let mut debtors = positions(balances, |b| b < -SETTLED_EPSILON);
    creditors.sort_by_key(|c| Reverse(c.remaining));
    debtors.sort_by_key(|d| Reverse(d.remaining));
    debug!(
        creditors = creditors.len(),
        debtors = debtors.len(),
        "planning settlements"
    );

    let mut settlements = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < creditors.len() && j < debtors.len() {
        let creditor = &mut creditors[i];
        let debtor = &mut debtors[j];
        let amount = creditor.remaining.min(debtor.remaining);

        if amount > Cents::ZERO {
            settlements.push(Settlement {
                from: debtor.name.to_string(),
                to: creditor.name.to_string(),
                amount: to_dollars(amount),
            });
            creditor.remaining -= amount;
            debtor.remaining -= amount;
        }

        if creditor.remaining <= Cents::ZERO {
            i += 1;
        }
        if debtor.remaining <= Cents::ZERO {
            j += 1;
        }
    }
    settlements
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn balance(name: &str, balance: f64) -> Balance {
        Balance {
            person_id: name.to_lowercase(),
            person_name: name.to_string(),
            paid: 0.0,
            owes: 0.0,
            balance,
        }
    }

    fn plan(balances: &[(&str, f64)]) -> Vec<(String, String, f64)> {
        let balances: Vec<Balance> = balances.iter().map(|(n, b)| balance(n, *b)).collect();
        calculate_settlements(&balances)
            .into_iter()
            .map(|s| (s.from, s.to, s.amount))
            .collect()
    }

    fn owed(from: &str, to: &str, amount: f64) -> (String, String, f64) {
        (from.to_string(), to.to_string(), amount)
    }

    #[rstest]
    #[case::one_creditor_two_debtors(
        &[("Alice", 80.0), ("Bob", -40.0), ("Charlie", -40.0)],
        vec![owed("Bob", "Alice", 40.0), owed("Charlie", "Alice", 40.0)]
    )]
    #[case::largest_first(
        &[("Alice", 10.0), ("Bob", 50.0), ("Carol", -35.0), ("Dan", -25.0)],
        vec![
            owed("Carol", "Bob", 35.0),
            owed("Dan", "Bob", 15.0),
            owed("Dan", "Alice", 10.0),
        ]
    )]
    #[case::exact_match_advances_both(
        &[("Alice", 30.0), ("Bob", -30.0), ("Carol", 20.0), ("Dan", -20.0)],
        vec![owed("Bob", "Alice", 30.0), owed("Dan", "Carol", 20.0)]
    )]
    #[case::within_epsilon_is_settled(
        &[("Alice", 0.01), ("Bob", -0.01), ("Carol", 0.0)],
        vec![]
    )]
    #[case::all_settled(&[("Alice", 0.0), ("Bob", 0.0)], vec![])]
    #[case::empty(&[], vec![])]
    #[case::negative_infinity(
        &[("Alice", f64::NEG_INFINITY), ("Bob", 5.0)],
        vec![owed("Alice", "Bob", 5.0)]
    )]
    #[case::positive_infinity(
        &[("Alice", f64::INFINITY), ("Bob", -5.0), ("Carol", -2.5)],
        vec![owed("Bob", "Alice", 5.0), owed("Carol", "Alice", 2.5)]
    )]
    #[case::near_i64_max(
        &[("Alice", 9e16), ("Bob", -9e16)],
        vec![owed("Bob", "Alice", 9e16)]
    )]
    #[case::nan_is_settled(&[("Alice", f64::NAN), ("Bob", 5.0)], vec![])]
    #[case::uneven_thirds(
        &[("Alice", 66.66), ("Bob", -33.33), ("Charlie", -33.33)],
        vec![owed("Bob", "Alice", 33.33), owed("Charlie", "Alice", 33.33)]
    )]
    fn plans_settlements(
        #[case] balances: &[(&str, f64)],
        #[case] expected: Vec<(String, String, f64)>,
    ) {
        assert_eq!(plan(balances), expected);
    }

    #[test]
    fn one_sided_balances_stop_when_a_side_is_exhausted() {
        assert!(plan(&[("Alice", 25.0), ("Bob", 5.0)]).is_empty());
        assert!(plan(&[("Alice", -25.0)]).is_empty());
    }

    #[test]
    fn equal_balances_keep_input_order() {
        let settlements = plan(&[("Zed", -10.0), ("Amy", -10.0), ("Bo", 20.0)]);
        assert_eq!(settlements, vec![owed("Zed", "Bo", 10.0), owed("Amy", "Bo", 10.0)]);
    }

    #[test]
    fn float_noise_is_absorbed() {
        let settlements = plan(&[("Alice", 0.1 + 0.2), ("Bob", -0.3)]);
        assert_eq!(settlements, vec![owed("Bob", "Alice", 0.3)]);
    }

    #[test]
    fn is_idempotent() {
        let balances = vec![balance("Alice", 12.5), balance("Bob", -7.25), balance("Cy", -5.25)];
        assert_eq!(calculate_settlements(&balances), calculate_settlements(&balances));
    }
}
