use crate::core::entity::{Entity, EntityName};
use crate::core::transaction::{CashflowDirection, CashflowTotals, Transaction, TransactionError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Tracks every counterparty seen in the feed and the transactions
/// booked against it.
///
/// Entities are created lazily on their first transaction and kept in
/// first-seen order. That order is the tie-break when two entities have
/// the same total in a ranking, so rankings are deterministic for a given
/// input.
#[derive(Debug, Clone, Default)]
pub struct EntityLedger {
    /// Entities in first-seen order.
    entities: Vec<Entity>,
    /// Name -> position in `entities`.
    index: HashMap<EntityName, usize>,
    /// Running totals over every entity.
    totals: CashflowTotals,
}

impl EntityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entity called `name`, creating it if this is the first time
    /// the name is seen.
    pub fn get_or_create(&mut self, name: &EntityName) -> &mut Entity {
        let next = self.entities.len();
        let idx = *self.index.entry(name.clone()).or_insert(next);
        if idx == next {
            self.entities.push(Entity::new(name.clone()));
        }
        &mut self.entities[idx]
    }

    /// Book a transaction against its entity.
    ///
    /// Nothing is booked, and no entity is created, when the entity's total
    /// or the running total would overflow.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<(), TransactionError> {
        self.can_add(&transaction)?;
        let totals = self
            .totals
            .checked_add(transaction.direction(), transaction.usd_value())?;
        let name = transaction.entity_name().clone();
        self.get_or_create(&name).add_transaction(transaction)?;
        self.totals = totals;
        Ok(())
    }

    /// Whether `transaction` can be booked without overflow.
    pub fn can_add(&self, transaction: &Transaction) -> Result<(), TransactionError> {
        let (direction, amount) = (transaction.direction(), transaction.usd_value());
        if let Some(entity) = self.get(transaction.entity_name()) {
            entity.totals().checked_add(direction, amount)?;
        }
        self.totals.checked_add(direction, amount).map(|_| ())
    }

    pub fn get(&self, name: &EntityName) -> Option<&Entity> {
        self.index.get(name).map(|&idx| &self.entities[idx])
    }

    /// All entities in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Every known entity, largest total in `direction` first.
    ///
    /// Entities with nothing in that direction are still included, at the
    /// bottom. Equal totals keep first-seen order.
    pub fn ranked_by(&self, direction: CashflowDirection) -> Vec<&Entity> {
        let mut ranked: Vec<(&Entity, Decimal)> = self
            .entities
            .iter()
            .map(|e| (e, e.total_directed_cashflow(direction)))
            .collect();
        // sort_by is stable
        ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
        ranked.into_iter().map(|(e, _)| e).collect()
    }

    /// Sum of all entities' totals in `direction`.
    pub fn total(&self, direction: CashflowDirection) -> Decimal {
        self.totals.total(direction)
    }
}
