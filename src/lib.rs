//! Shared-expense bookkeeping: who paid what, who owes whom, and the fewest
//! payments that square everyone up.
//!
//! [`calculate_balances`] and [`calculate_settlements`] are pure and never fail.
//! The remaining modules are the service around them: group editing with input
//! validation, MongoDB storage and the HTTP API.

pub mod balance;
pub mod config;
pub mod error;
pub mod group;
pub mod money;
pub mod routes;
pub mod schemas;
pub mod settlement;
pub mod split;
pub mod store;

pub use balance::calculate_balances;
pub use settlement::calculate_settlements;
