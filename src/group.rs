use bson::oid::ObjectId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::balance::calculate_balances;
use crate::error::{ExpenseError, PersonError};
use crate::money::{to_cents, to_dollars, Cents};
use crate::schemas::{Balance, Expense, Group, Person, PersonId, Settlement, SplitType};
use crate::settlement::{calculate_settlements, SETTLED_EPSILON};
use crate::split::{custom_splits, equal_splits};

const UNKNOWN_PERSON: &str = "Unknown";

/// A participant picked for a new expense. `amount` is only read for custom splits.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub person_id: PersonId,
    #[serde(default)]
    pub amount: Option<f64>,
}

/// An expense as entered, before its splits are computed.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub paid_by: PersonId,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub split_type: SplitType,
    pub participants: Vec<Participant>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub balances: Vec<SummaryBalance>,
    pub settlements: Vec<Settlement>,
    pub total_spending: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryBalance {
    #[serde(flatten)]
    pub balance: Balance,
    pub standing: BalanceStanding,
}

/// An expense with its payer's display name resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    #[serde(flatten)]
    pub expense: Expense,
    pub payer_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStanding {
    Creditor,
    Debtor,
    Settled,
}

impl BalanceStanding {
    pub fn of(balance: &Balance) -> Self {
        if balance.balance > SETTLED_EPSILON {
            BalanceStanding::Creditor
        } else if balance.balance < -SETTLED_EPSILON {
            BalanceStanding::Debtor
        } else {
            BalanceStanding::Settled
        }
    }
}

fn new_id() -> String {
    ObjectId::new().to_hex()
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

impl Group {
    pub fn new(id: String, name: String) -> Self {
        Group {
            id,
            name,
            people: Vec::new(),
            expenses: Vec::new(),
        }
    }

    pub fn add_person(&mut self, name: &str) -> Result<&Person, PersonError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PersonError::EmptyName);
        }
        let lowered = name.to_lowercase();
        if self.people.iter().any(|p| p.name.to_lowercase() == lowered) {
            return Err(PersonError::AlreadyExists);
        }
        self.people.push(Person {
            id: new_id(),
            name: name.to_string(),
        });
        let person = &self.people[self.people.len() - 1];
        info!(group = %self.id, person = %person.id, "added person");
        Ok(person)
    }

    /// Removes the person but keeps every expense that mentions them.
    pub fn remove_person(&mut self, id: &str) -> Option<Person> {
        let index = self.people.iter().position(|p| p.id == id)?;
        info!(group = %self.id, person = %id, "removed person");
        Some(self.people.remove(index))
    }

    /// Validates `draft`, builds its splits and stores it as the newest expense.
    pub fn add_expense(&mut self, draft: NewExpense) -> Result<&Expense, ExpenseError> {
        let description = draft.description.trim();
        let amount_missing = !draft.amount.is_finite() || draft.amount == 0.0;
        if description.is_empty()
            || amount_missing
            || draft.paid_by.is_empty()
            || draft.participants.is_empty()
        {
            return Err(ExpenseError::MissingFields);
        }

        let total = to_cents(draft.amount);
        let splits = match draft.split_type {
            SplitType::Equal => {
                let ids: Vec<PersonId> = draft
                    .participants
                    .iter()
                    .map(|p| p.person_id.clone())
                    .collect();
                equal_splits(total, &ids)
            }
            SplitType::Custom => {
                let shares: Vec<(PersonId, f64)> = draft
                    .participants
                    .iter()
                    .map(|p| (p.person_id.clone(), p.amount.unwrap_or(0.0)))
                    .collect();
                custom_splits(total, &shares)?
            }
        };

        let expense = Expense {
            id: new_id(),
            description: description.to_string(),
            amount: draft.amount,
            paid_by: draft.paid_by,
            date: draft.date.unwrap_or_else(today),
            split_type: draft.split_type,
            splits,
        };
        info!(group = %self.id, expense = %expense.id, total = %total, "added expense");
        self.expenses.insert(0, expense);
        Ok(&self.expenses[0])
    }

    pub fn delete_expense(&mut self, id: &str) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id == id)?;
        info!(group = %self.id, expense = %id, "deleted expense");
        Some(self.expenses.remove(index))
    }

    pub fn person_name(&self, id: &str) -> &str {
        self.people
            .iter()
            .find(|p| p.id == id)
            .map_or(UNKNOWN_PERSON, |p| p.name.as_str())
    }

    /// Expenses newest first, with payers no longer in the group shown as "Unknown".
    pub fn expense_history(&self) -> Vec<ExpenseEntry> {
        self.expenses
            .iter()
            .map(|expense| ExpenseEntry {
                payer_name: self.person_name(&expense.paid_by).to_string(),
                expense: expense.clone(),
            })
            .collect()
    }

    pub fn balances(&self) -> Vec<Balance> {
        calculate_balances(&self.people, &self.expenses)
    }

    pub fn summary(&self) -> GroupSummary {
        let balances = self.balances();
        let settlements = calculate_settlements(&balances);
        let total_spending: Cents = balances.iter().map(|b| to_cents(b.paid)).sum();
        debug!(
            group = %self.id,
            settlements = settlements.len(),
            total = %total_spending,
            "computed summary"
        );
        GroupSummary {
            balances: balances
                .into_iter()
                .map(|balance| SummaryBalance {
                    standing: BalanceStanding::of(&balance),
                    balance,
                })
                .collect(),
            settlements,
            total_spending: to_dollars(total_spending),
        }
    }
}
