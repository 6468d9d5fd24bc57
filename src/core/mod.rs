//! Foundational types: currencies, counterparties, transactions and the
//! settlement date rule.

pub mod currency;
pub mod entity;
pub mod settlement;
pub mod transaction;
