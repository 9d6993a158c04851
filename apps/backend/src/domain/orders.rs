//! Order sets and default-order synthesis.

use serde::Serialize;

/// The collected orders for one power for the current phase.
///
/// A power holds at most one `OrderSet` per phase; re-submission
/// replaces the whole set. The set is immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderSet {
    orders: Vec<String>,
}

impl OrderSet {
    pub fn new(orders: Vec<String>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &[String] {
        &self.orders
    }

    pub fn into_orders(self) -> Vec<String> {
        self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl From<Vec<String>> for OrderSet {
    fn from(orders: Vec<String>) -> Self {
        Self::new(orders)
    }
}

/// Synthesize a hold order for every unit descriptor (e.g. "A PAR" -> "A PAR H").
///
/// Used by the resolver to default powers that submitted nothing, so a
/// phase can always resolve even with absent players.
pub fn hold_orders(units: &[String]) -> Vec<String> {
    units.iter().map(|unit| format!("{unit} H")).collect()
}

#[cfg(test)]
mod tests {
    use super::{hold_orders, OrderSet};

    #[test]
    fn hold_orders_cover_every_unit() {
        let units = vec!["A PAR".to_string(), "F BRE".to_string()];
        assert_eq!(hold_orders(&units), vec!["A PAR H", "F BRE H"]);
        assert!(hold_orders(&[]).is_empty());
    }

    #[test]
    fn order_set_is_a_plain_sequence() {
        let set = OrderSet::new(vec!["A PAR H".to_string()]);
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
        assert_eq!(set.orders(), ["A PAR H".to_string()]);
    }
}
