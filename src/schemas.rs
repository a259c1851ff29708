use serde::{Deserialize, Serialize};

pub type PersonId = String;
pub type ExpenseId = String;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    #[default]
    Equal,
    Custom,
}

/// One participant's owed share of an expense.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSplit {
    pub person_id: PersonId,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    pub paid_by: PersonId,
    pub date: String,
    pub split_type: SplitType,
    pub splits: Vec<ExpenseSplit>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

/// Net position of one person, derived on every calculation.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub person_id: PersonId,
    pub person_name: String,
    pub paid: f64,
    pub owes: f64,
    pub balance: f64,
}

/// A suggested payment between two display names.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Settlement {
    pub from: String,
    pub to: String,
    pub amount: f64,
}
