//! Per-day mapping between sparse customer ids and dense node indices.

use std::collections::HashMap;

/// Node 0 is the depot; nodes 1..=N are the day's routed customers.
///
/// Rebuilt every day because the selected subset changes; never reused
/// across days.
///
/// # Examples
///
/// ```
/// use stockroute::routing::LocationIndex;
///
/// let index = LocationIndex::new(&[42, 7, 1003]);
/// assert_eq!(index.node_of(7), Some(2));
/// assert_eq!(index.customer_at(2), Some(7));
/// assert_eq!(index.customer_at(0), None); // depot
/// assert_eq!(index.num_nodes(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct LocationIndex {
    ids: Vec<i64>,
    nodes: HashMap<i64, usize>,
}

impl LocationIndex {
    /// Builds the index for the given customers, in their selection order.
    pub fn new(customer_ids: &[i64]) -> Self {
        let nodes = customer_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i + 1))
            .collect();
        Self {
            ids: customer_ids.to_vec(),
            nodes,
        }
    }

    /// Dense node index for a customer id.
    pub fn node_of(&self, customer_id: i64) -> Option<usize> {
        self.nodes.get(&customer_id).copied()
    }

    /// Customer id at a node; `None` for the depot or out-of-range nodes.
    pub fn customer_at(&self, node: usize) -> Option<i64> {
        if node == 0 {
            return None;
        }
        self.ids.get(node - 1).copied()
    }

    /// Total nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.ids.len() + 1
    }
}
