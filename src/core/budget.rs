//! Budget-constrained shopping list generation.
//!
//! Given the current inventory and a spending cap, propose what to buy:
//! items that are running low or expiring soon are scored by priority and
//! urgency, ranked by score per rupee, and taken greedily while they fit the
//! remaining budget. The generator itself is a pure function of the items,
//! the budget, and the reference day.

use crate::{
    core::expiry,
    core::inventory,
    core::priority::Priority,
    entities::inventory_item,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing::debug;

/// Items expiring within this many days count as "near expiry".
pub const EXPIRY_SOON_DAYS: i64 = 7;

const LOW_STOCK_BONUS: u32 = 30;
const EXPIRY_SOON_BONUS: u32 = 50;

/// Measurement unit of an inventory item, normalized from its stored label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Countable pieces ("unit", "pcs")
    Unit,
    /// Kilograms
    Kg,
    /// Grams
    Gram,
    /// Litres
    Litre,
    /// Millilitres
    Ml,
}

impl Unit {
    /// Normalizes a stored measurement-unit label, falling back to
    /// inference from the item description and finally to `Unit`.
    #[must_use]
    pub fn for_item(item: &inventory_item::Model) -> Self {
        match item.measurement_unit.trim().to_lowercase().as_str() {
            "kg" => return Self::Kg,
            "g" => return Self::Gram,
            "l" => return Self::Litre,
            "ml" => return Self::Ml,
            "unit" | "pcs" => return Self::Unit,
            _ => {}
        }

        // Fallback: infer from the description (less reliable)
        let desc = item.description.to_lowercase();
        if desc.contains("kg") {
            Self::Kg
        } else if desc.contains(" g") {
            Self::Gram
        } else if desc.contains(" l") && !desc.contains("ml") {
            Self::Litre
        } else if desc.contains("ml") {
            Self::Ml
        } else {
            Self::Unit
        }
    }

    /// Stock level below which an item counts as low stock.
    #[must_use]
    pub const fn low_stock_threshold(self) -> f64 {
        match self {
            Self::Kg | Self::Litre => 1.0,
            Self::Gram | Self::Ml => 100.0,
            Self::Unit => 2.0,
        }
    }

    /// How much of the item one restocking purchase buys.
    #[must_use]
    pub const fn purchase_quantity(self) -> f64 {
        match self {
            Self::Kg | Self::Litre | Self::Unit => 1.0,
            Self::Gram | Self::Ml => 100.0,
        }
    }

    /// Display label for quantity strings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Kg => "kg",
            Self::Gram => "g",
            Self::Litre => "l",
            Self::Ml => "ml",
        }
    }
}

/// One proposed purchase on the generated list.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSuggestion {
    /// What to buy
    pub description: String,
    /// Quantity with its unit, e.g. "1 kg" or "100 g"
    pub quantity: String,
    /// Cost of the purchase, rounded to two decimals
    pub cost: f64,
    /// Why the item made the list ("Low Stock", "Near Expiry", or both)
    pub reason: String,
}

struct Candidate {
    description: String,
    unit: Unit,
    purchase_quantity: f64,
    purchase_cost: f64,
    value_per_cost: f64,
    reason: String,
}

/// A line with a price and a quantity, for budget totalling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostedLine {
    /// Price per line or per unit
    pub price: f64,
    /// Quantity the price applies to
    pub quantity: f64,
}

/// Generates a budget-friendly shopping list from the given inventory.
///
/// Essential and Important items qualify when they are low on stock
/// (`current_stock` below the unit's threshold) or expire within
/// [`EXPIRY_SOON_DAYS`] days of `today`. Qualifying items are scored
/// (priority base plus urgency bonuses), ranked by score per cost, and taken
/// greedily while their restocking cost fits the remaining budget. Items with
/// a blank description or a non-positive unit price are ignored.
#[must_use]
pub fn generate_budget_list(
    items: &[inventory_item::Model],
    budget: f64,
    today: NaiveDate,
) -> Vec<BudgetSuggestion> {
    let mut candidates: Vec<Candidate> = Vec::new();

    for item in items {
        if item.description.trim().is_empty() || item.unit_price <= 0.0 {
            continue;
        }

        let unit = Unit::for_item(item);
        let is_low_stock = item.current_stock < unit.low_stock_threshold();

        let status = expiry::classify_expiry(item.expiry_date.as_deref(), today);
        let is_expiring_soon = matches!(
            status.days_remaining,
            Some(d) if (0..=EXPIRY_SOON_DAYS).contains(&d)
        );

        let priority = Priority::from_stored(item.priority.as_deref());
        let qualifies = matches!(priority, Priority::Essential | Priority::Important)
            && (is_low_stock || is_expiring_soon);
        if !qualifies {
            continue;
        }

        let mut score = priority.score();
        let mut reasons = Vec::new();
        if is_low_stock {
            score += LOW_STOCK_BONUS;
            reasons.push("Low Stock");
        }
        if is_expiring_soon {
            score += EXPIRY_SOON_BONUS;
            reasons.push("Near Expiry");
        }

        let purchase_quantity = unit.purchase_quantity();
        let purchase_cost = purchase_quantity * item.unit_price;

        candidates.push(Candidate {
            description: item.description.clone(),
            unit,
            purchase_quantity,
            purchase_cost,
            value_per_cost: f64::from(score) / purchase_cost,
            reason: reasons.join(", "),
        });
    }

    // Most value for money first; ties keep inventory order
    candidates.sort_by(|a, b| {
        b.value_per_cost
            .partial_cmp(&a.value_per_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut suggestions = Vec::new();
    let mut remaining = budget;
    for candidate in candidates {
        if candidate.purchase_cost > 0.0 && candidate.purchase_cost <= remaining {
            suggestions.push(BudgetSuggestion {
                description: candidate.description,
                quantity: format_quantity(candidate.purchase_quantity, candidate.unit),
                cost: round_to_cents(candidate.purchase_cost),
                reason: candidate.reason,
            });
            remaining -= candidate.purchase_cost;
        }
    }

    debug!(
        generated = suggestions.len(),
        remaining_budget = remaining,
        "budget shopping list generated"
    );
    suggestions
}

/// Generates a budget shopping list for one owner's inventory.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] for a non-positive or non-finite budget,
/// or an error if fetching the inventory fails.
pub async fn generate_for_owner(
    db: &DatabaseConnection,
    owner_uid: &str,
    budget: f64,
    today: NaiveDate,
) -> Result<Vec<BudgetSuggestion>> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(Error::InvalidAmount { amount: budget });
    }

    let items = inventory::items_for_owner(db, owner_uid).await?;
    Ok(generate_budget_list(&items, budget, today))
}

/// Sums a collection of priced lines into a budget total.
///
/// Each line contributes `price * quantity`; a line whose price already
/// covers the whole purchase carries quantity 1.
#[must_use]
pub fn compute_budget_total(lines: &[CostedLine]) -> f64 {
    lines.iter().map(|line| line.price * line.quantity).sum()
}

/// Sums generated suggestions into their estimated total.
#[must_use]
pub fn suggestions_total(suggestions: &[BudgetSuggestion]) -> f64 {
    let lines: Vec<CostedLine> = suggestions
        .iter()
        .map(|s| CostedLine {
            price: s.cost,
            quantity: 1.0,
        })
        .collect();
    compute_budget_total(&lines)
}

/// Whether a total exceeds the budget. Spending exactly the budget is not
/// over it.
#[must_use]
pub fn is_over_budget(total: f64, budget: f64) -> bool {
    total > budget
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn format_quantity(quantity: f64, unit: Unit) -> String {
    if quantity.fract() == 0.0 {
        // Cast safety: purchase quantities are small whole constants
        #[allow(clippy::cast_possible_truncation)]
        let whole = quantity as i64;
        format!("{} {}", whole, unit.label())
    } else {
        format!("{quantity} {}", unit.label())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_unit_normalization() {
        let mut item = budget_item(1, "Rice", Some("Important"), 0.5, 200.0, "KG", None);
        assert_eq!(Unit::for_item(&item), Unit::Kg);

        item.measurement_unit = "pcs".to_string();
        assert_eq!(Unit::for_item(&item), Unit::Unit);

        // Unknown label falls back to description inference
        item.measurement_unit = String::new();
        item.description = "Flour 1kg".to_string();
        assert_eq!(Unit::for_item(&item), Unit::Kg);

        item.description = "Sugar 500 g".to_string();
        assert_eq!(Unit::for_item(&item), Unit::Gram);

        item.description = "Plain biscuits".to_string();
        assert_eq!(Unit::for_item(&item), Unit::Unit);
    }

    #[test]
    fn test_low_stock_qualifies() {
        let today = day(2025, 3, 21);
        // 1 unit on hand, threshold for "unit" is 2
        let items = vec![budget_item(
            1,
            "Eggs",
            Some("Important"),
            1.0,
            50.0,
            "unit",
            None,
        )];

        let list = generate_budget_list(&items, 1000.0, today);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].description, "Eggs");
        assert_eq!(list[0].quantity, "1 unit");
        assert_eq!(list[0].cost, 50.0);
        assert_eq!(list[0].reason, "Low Stock");
    }

    #[test]
    fn test_near_expiry_qualifies_and_expired_does_not() {
        let today = day(2025, 3, 21);
        let items = vec![
            // Well stocked but expiring in 3 days
            budget_item(1, "Milk", Some("Important"), 5.0, 80.0, "unit", Some("2025-03-24")),
            // Expired items are not "near expiry"
            budget_item(2, "Old Milk", Some("Important"), 5.0, 80.0, "unit", Some("2025-03-10")),
        ];

        let list = generate_budget_list(&items, 1000.0, today);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].description, "Milk");
        assert_eq!(list[0].reason, "Near Expiry");
    }

    #[test]
    fn test_optional_items_never_qualify() {
        let today = day(2025, 3, 21);
        let items = vec![budget_item(
            1,
            "Chocolate",
            Some("Optional"),
            0.0,
            100.0,
            "unit",
            Some("2025-03-22"),
        )];

        let list = generate_budget_list(&items, 1000.0, today);
        assert!(list.is_empty());
    }

    #[test]
    fn test_missing_priority_reads_as_important() {
        let today = day(2025, 3, 21);
        let items = vec![budget_item(1, "Eggs", None, 1.0, 50.0, "unit", None)];

        let list = generate_budget_list(&items, 1000.0, today);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_items_without_price_are_ignored() {
        let today = day(2025, 3, 21);
        let items = vec![budget_item(
            1,
            "Mystery",
            Some("Essential"),
            0.0,
            0.0,
            "unit",
            None,
        )];

        let list = generate_budget_list(&items, 1000.0, today);
        assert!(list.is_empty());
    }

    #[test]
    fn test_ranking_prefers_value_for_money() {
        let today = day(2025, 3, 21);
        // Same cost: essential + low stock + near expiry scores 180,
        // important + low stock scores 80
        let items = vec![
            budget_item(1, "Bread", Some("Important"), 1.0, 100.0, "unit", None),
            budget_item(2, "Rice", Some("Essential"), 1.0, 100.0, "unit", Some("2025-03-24")),
        ];

        let list = generate_budget_list(&items, 1000.0, today);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].description, "Rice");
        assert_eq!(list[0].reason, "Low Stock, Near Expiry");
        assert_eq!(list[1].description, "Bread");
    }

    #[test]
    fn test_greedy_skips_what_does_not_fit() {
        let today = day(2025, 3, 21);
        // Value per cost: Eggs 130/60 ≈ 2.17, Ghee 180/120 = 1.5,
        // Salt 80/70 ≈ 1.14. With a budget of 150, Eggs leaves 90: Ghee no
        // longer fits, but the lower-ranked Salt still does.
        let items = vec![
            budget_item(1, "Eggs", Some("Essential"), 0.0, 60.0, "unit", None),
            budget_item(2, "Ghee", Some("Essential"), 0.0, 120.0, "unit", Some("2025-03-24")),
            budget_item(3, "Salt", Some("Important"), 0.0, 70.0, "unit", None),
        ];

        let list = generate_budget_list(&items, 150.0, today);
        let names: Vec<&str> = list.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(names, vec!["Eggs", "Salt"]);

        let total = suggestions_total(&list);
        assert!(total <= 150.0);
    }

    #[test]
    fn test_gram_purchases_scale_quantity() {
        let today = day(2025, 3, 21);
        // 50 g left, threshold 100 g; buy 100 g at 2.50 per gram
        let items = vec![budget_item(
            1,
            "Spice",
            Some("Essential"),
            50.0,
            2.5,
            "g",
            None,
        )];

        let list = generate_budget_list(&items, 1000.0, today);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].quantity, "100 g");
        assert_eq!(list[0].cost, 250.0);
    }

    #[test]
    fn test_budget_total_and_over_budget() {
        let lines: Vec<CostedLine> = [350.0, 400.0, 250.0, 500.0, 300.0]
            .iter()
            .map(|&price| CostedLine {
                price,
                quantity: 1.0,
            })
            .collect();

        let total = compute_budget_total(&lines);
        assert_eq!(total, 1800.0);
        assert!(!is_over_budget(total, 2000.0));

        // Raising any one price by 201 tips the total over
        let mut raised = lines;
        raised[2].price += 201.0;
        let total = compute_budget_total(&raised);
        assert_eq!(total, 2001.0);
        assert!(is_over_budget(total, 2000.0));
    }

    #[test]
    fn test_exactly_on_budget_is_not_over() {
        assert!(!is_over_budget(2000.0, 2000.0));
        assert!(is_over_budget(2000.01, 2000.0));
    }

    #[test]
    fn test_quantity_times_price_totalling() {
        let lines = vec![
            CostedLine {
                price: 50.0,
                quantity: 3.0,
            },
            CostedLine {
                price: 100.0,
                quantity: 1.0,
            },
        ];
        assert_eq!(compute_budget_total(&lines), 250.0);
    }

    #[tokio::test]
    async fn test_generate_for_owner_validates_budget() -> crate::errors::Result<()> {
        let (db, _feed) = setup_test_env().await?;

        let result = generate_for_owner(&db, "user-1", 0.0, day(2025, 3, 21)).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: _ }));

        let result = generate_for_owner(&db, "user-1", -10.0, day(2025, 3, 21)).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: _ }));

        let list = generate_for_owner(&db, "user-1", 500.0, day(2025, 3, 21)).await?;
        assert!(list.is_empty());

        Ok(())
    }
}
