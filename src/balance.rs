use std::collections::HashMap;

use tracing::trace;

use crate::money::{to_cents, to_dollars, Cents};
use crate::schemas::{Balance, Expense, Person};

#[derive(Default)]
struct Accumulator {
    paid: Cents,
    owes: Cents,
}

/// Computes one balance per person, in the order of `people`.
///
/// Amounts are accumulated in cents. Payers and split participants that are not
/// in `people` are skipped; no input makes this fail.
pub fn calculate_balances(people: &[Person], expenses: &[Expense]) -> Vec<Balance> {
    let mut accumulators: HashMap<&str, Accumulator> = people
        .iter()
        .map(|person| (person.id.as_str(), Accumulator::default()))
        .collect();

    for expense in expenses {
        match accumulators.get_mut(expense.paid_by.as_str()) {
            Some(payer) => payer.paid += to_cents(expense.amount),
            None => trace!(expense = %expense.id, payer = %expense.paid_by, "unknown payer"),
        }
        for split in &expense.splits {
            if let Some(participant) = accumulators.get_mut(split.person_id.as_str()) {
                participant.owes += to_cents(split.amount);
            }
        }
    }

    people
        .iter()
        .map(|person| {
            let totals = &accumulators[person.id.as_str()];
            Balance {
                person_id: person.id.clone(),
                person_name: person.name.clone(),
                paid: to_dollars(totals.paid),
                owes: to_dollars(totals.owes),
                // From cents, so rounding in `paid`/`owes` does not compound
                balance: to_dollars(totals.paid - totals.owes),
            }
        })
        .collect()
}
