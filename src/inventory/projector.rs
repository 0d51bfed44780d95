//! Inventory projection: delivery triggering, fill-up sizing, consumption.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::Customer;

/// Per-customer inventory levels over the planning horizon.
///
/// The projector owns the only mutable inventory state. The plan driver
/// advances it day by day: select candidates, apply the day's deliveries,
/// then consume one day of demand.
///
/// # Examples
///
/// ```
/// use stockroute::inventory::InventoryProjector;
/// use stockroute::models::Customer;
///
/// let customers = vec![Customer {
///     id: 1, latitude: 0.0, longitude: 0.0,
///     demand_rate: 100.0, max_inventory: 1000.0,
///     current_inventory: 250.0, min_inventory: 100.0, priority: 0,
/// }];
/// let mut inv = InventoryProjector::new(&customers, 2.0);
///
/// // (250 - 100) / 100 = 1.5 days of cover, inside the 2-day window.
/// let picked = inv.candidates_for_day(&customers);
/// assert_eq!(picked.len(), 1);
/// assert_eq!(inv.delivery_quantity(&customers[0]), 750.0);
///
/// inv.apply_delivery(1, 750.0);
/// inv.consume_daily(&customers);
/// assert_eq!(inv.level(1), 900.0);
/// ```
#[derive(Debug, Clone)]
pub struct InventoryProjector {
    levels: HashMap<i64, f64>,
    lookahead_days: f64,
}

impl InventoryProjector {
    /// Seeds the projector from each customer's starting inventory.
    pub fn new(customers: &[Customer], lookahead_days: f64) -> Self {
        Self {
            levels: customers
                .iter()
                .map(|c| (c.id, c.current_inventory))
                .collect(),
            lookahead_days,
        }
    }

    /// Current level for a customer; zero for unknown ids.
    pub fn level(&self, customer_id: i64) -> f64 {
        self.levels.get(&customer_id).copied().unwrap_or(0.0)
    }

    /// Returns `true` if the customer should receive a delivery today.
    ///
    /// Triggers when the level is at or below the reorder point, or when the
    /// remaining cover above it runs out within the lookahead window.
    pub fn needs_delivery(&self, customer: &Customer) -> bool {
        let level = self.level(customer.id);
        if level <= customer.min_inventory {
            return true;
        }
        customer.demand_rate > 0.0
            && (level - customer.min_inventory) / customer.demand_rate <= self.lookahead_days
    }

    /// The customers to route today, most urgent first.
    ///
    /// Ordered by priority (descending), then demand rate (descending),
    /// with input order as the stable tie-break.
    pub fn candidates_for_day<'a>(&self, customers: &'a [Customer]) -> Vec<&'a Customer> {
        let mut picked: Vec<&Customer> = customers
            .iter()
            .filter(|c| self.needs_delivery(c))
            .collect();
        picked.sort_by(|a, b| {
            b.priority.cmp(&a.priority).then(
                b.demand_rate
                    .partial_cmp(&a.demand_rate)
                    .unwrap_or(Ordering::Equal),
            )
        });
        picked
    }

    /// Fill-up quantity: what tops the customer back to `max_inventory`.
    ///
    /// Never negative. Vehicle capacity is the router's concern, not this
    /// one's.
    pub fn delivery_quantity(&self, customer: &Customer) -> f64 {
        (customer.max_inventory - self.level(customer.id)).max(0.0)
    }

    /// Records a delivery. The caller guarantees the quantity fits below
    /// `max_inventory`.
    pub fn apply_delivery(&mut self, customer_id: i64, quantity: f64) {
        if let Some(level) = self.levels.get_mut(&customer_id) {
            *level += quantity;
        }
    }

    /// Consumes one day of demand for every customer, flooring at zero.
    ///
    /// Called exactly once per day, after that day's deliveries.
    pub fn consume_daily(&mut self, customers: &[Customer]) {
        for customer in customers {
            if let Some(level) = self.levels.get_mut(&customer.id) {
                *level = (*level - customer.demand_rate).max(0.0);
            }
        }
    }
}
