//! Building the per-person shares of an expense.
//!
//! Balance calculation trusts whatever splits it is given; the functions here
//! are what guarantee that the shares of a new expense add up to its total.

use crate::error::ExpenseError;
use crate::money::{to_cents, to_dollars, Cents};
use crate::schemas::{ExpenseSplit, PersonId};

/// Divides `total` evenly, handing leftover cents to the first participants.
pub fn equal_splits(total: Cents, participants: &[PersonId]) -> Vec<ExpenseSplit> {
    if participants.is_empty() {
        return Vec::new();
    }
    let count = participants.len() as i64;
    let base = total.amount().div_euclid(count);
    let mut remainder = total.amount() - base * count;

    participants
        .iter()
        .map(|id| {
            let extra = if remainder > 0 {
                remainder -= 1;
                1
            } else {
                0
            };
            ExpenseSplit {
                person_id: id.clone(),
                amount: to_dollars(Cents::new(base + extra)),
            }
        })
        .collect()
}

/// Uses the entered shares as-is once they add up to `total` to the cent.
pub fn custom_splits(
    total: Cents,
    shares: &[(PersonId, f64)],
) -> Result<Vec<ExpenseSplit>, ExpenseError> {
    let splits: Cents = shares.iter().map(|(_, amount)| to_cents(*amount)).sum();
    if splits != total {
        return Err(ExpenseError::CustomSplitMismatch { splits, total });
    }
    Ok(shares
        .iter()
        .map(|(id, amount)| ExpenseSplit {
            person_id: id.clone(),
            amount: *amount,
        })
        .collect())
}
