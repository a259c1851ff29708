use crate::money::Cents;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PersonError {
    #[error("Please enter a name")]
    EmptyName,
    #[error("Person already exists")]
    AlreadyExists,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ExpenseError {
    #[error("Please fill all fields")]
    MissingFields,
    #[error("Custom amounts (${splits}) must equal total amount (${total})")]
    CustomSplitMismatch { splits: Cents, total: Cents },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}
