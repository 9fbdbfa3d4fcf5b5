//! Inventory ledger: quantity-on-hand tracking with depletion handling.
//!
//! Inventory is best-effort bookkeeping. Consuming more than is on hand, or
//! consuming an item that was never tracked, produces a [`Shortfall`]
//! warning; it never fails the operation that triggered the consumption.
//! Negative stock is never persisted: depletion deletes the entry.

use chrono::Utc;
use uuid::Uuid;

use crate::convert;
use crate::error::NutrientError;
use crate::store::Datastore;
use crate::types::{InventoryEntry, ItemRef, Shortfall};

/// Result of a single consumption.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumeOutcome {
    /// True when the entry was removed because stock hit zero or below.
    pub depleted: bool,
    /// Present when stock was insufficient or absent.
    pub shortfall: Option<Shortfall>,
}

/// Result of assembling a recipe into inventory.
///
/// One assembly can drain several ingredient entries, so shortfalls are a
/// list, not a single warning.
#[derive(Debug, Clone)]
pub struct AssembleOutcome {
    pub entry: InventoryEntry,
    pub shortfalls: Vec<Shortfall>,
}

fn display_name<S: Datastore>(store: &S, item: ItemRef) -> String {
    match item {
        ItemRef::Ingredient(id) => store
            .ingredient(id)
            .map(|i| i.name)
            .unwrap_or_else(|| "unknown ingredient".to_string()),
        ItemRef::Recipe(id) => store
            .recipe(id)
            .map(|r| r.name)
            .unwrap_or_else(|| "unknown recipe".to_string()),
    }
}

/// Convert a quantity into the unit an inventory entry is stored in.
///
/// Recipes are tracked in servings only and have no unit registry, so their
/// quantities pass through unchanged.
fn in_entry_unit<S: Datastore>(
    store: &S,
    item: ItemRef,
    quantity: f64,
    unit: &str,
    entry_unit: &str,
) -> f64 {
    match item {
        ItemRef::Ingredient(id) => {
            convert::convert_or_keep(id, &store.units_for(id), quantity, unit, entry_unit)
        }
        ItemRef::Recipe(_) => quantity,
    }
}

/// Add stock for an item.
///
/// When an entry already exists, the incoming quantity is converted into the
/// entry's stored unit and merged; a new entry is created with the supplied
/// unit otherwise.
pub fn add<S: Datastore>(
    store: &mut S,
    item: ItemRef,
    quantity: f64,
    unit: &str,
) -> InventoryEntry {
    if let Some(existing) = store.inventory_for(item) {
        let converted = in_entry_unit(store, item, quantity, unit, &existing.unit);
        let new_quantity = existing.quantity + converted;
        store.set_inventory_quantity(existing.id, new_quantity);
        tracing::debug!(
            entry = %existing.id,
            quantity = new_quantity,
            unit = %existing.unit,
            "inventory merged"
        );
        InventoryEntry {
            quantity: new_quantity,
            updated_at: Utc::now(),
            ..existing
        }
    } else {
        let now = Utc::now();
        let entry = InventoryEntry {
            id: Uuid::new_v4(),
            item,
            quantity,
            unit: unit.to_string(),
            created_at: now,
            updated_at: now,
        };
        store.insert_inventory(entry.clone());
        entry
    }
}

/// Consume stock for an item.
///
/// The requested quantity is converted into the entry's stored unit and
/// subtracted. A remainder of zero or below counts as depletion: the entry
/// is deleted and a shortfall reports what was had versus needed. An item
/// with no entry at all reports a shortfall with `had = 0`.
pub fn consume<S: Datastore>(
    store: &mut S,
    item: ItemRef,
    quantity: f64,
    unit: &str,
) -> ConsumeOutcome {
    let Some(entry) = store.inventory_for(item) else {
        return ConsumeOutcome {
            depleted: false,
            shortfall: Some(Shortfall {
                name: display_name(store, item),
                had: 0.0,
                needed: quantity,
                unit: unit.to_string(),
            }),
        };
    };

    let needed = in_entry_unit(store, item, quantity, unit, &entry.unit);
    let remaining = entry.quantity - needed;

    if remaining <= 0.0 {
        store.delete_inventory(entry.id);
        tracing::debug!(entry = %entry.id, "inventory depleted, entry removed");
        ConsumeOutcome {
            depleted: true,
            shortfall: Some(Shortfall {
                name: display_name(store, item),
                had: entry.quantity,
                needed,
                unit: entry.unit,
            }),
        }
    } else {
        store.set_inventory_quantity(entry.id, remaining);
        ConsumeOutcome {
            depleted: false,
            shortfall: None,
        }
    }
}

/// Assemble `servings` of a recipe into inventory.
///
/// Every ingredient line is scaled by `servings / recipe.servings` and
/// consumed, collecting any shortfalls, then the recipe's own entry is
/// created or incremented. Shortfalls do not abort the assembly.
pub fn assemble_recipe<S: Datastore>(
    store: &mut S,
    recipe_id: Uuid,
    servings: f64,
    unit: &str,
) -> Result<AssembleOutcome, NutrientError> {
    let recipe = store
        .recipe(recipe_id)
        .ok_or(NutrientError::UnknownRecipe(recipe_id))?;

    let ratio = servings / recipe.servings;
    let mut shortfalls = Vec::new();

    for line in store.recipe_ingredients(recipe_id) {
        let needed = line.quantity * ratio;
        let outcome = consume(
            store,
            ItemRef::Ingredient(line.ingredient_id),
            needed,
            &line.unit,
        );
        if let Some(shortfall) = outcome.shortfall {
            shortfalls.push(shortfall);
        }
    }

    let entry = add(store, ItemRef::Recipe(recipe_id), servings, unit);
    Ok(AssembleOutcome { entry, shortfalls })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, NewIngredient, NewNutrient, NewUnit};
    use crate::memory::MemoryStore;

    fn broccoli(store: &mut MemoryStore) -> Uuid {
        catalog::create_ingredient(
            store,
            NewIngredient {
                name: "Broccoli".to_string(),
                brand: None,
                servings_per_container: None,
                units: vec![
                    NewUnit::new("serving", 1.0, true),
                    NewUnit::new("g", 85.0, false),
                ],
                nutrients: vec![NewNutrient::new("fiber", "g", 2.4)],
            },
        )
        .unwrap()
        .id
    }

    #[test]
    fn test_add_creates_entry() {
        let mut store = MemoryStore::new();
        let id = broccoli(&mut store);

        let entry = add(&mut store, ItemRef::Ingredient(id), 5.0, "serving");
        assert_eq!(entry.quantity, 5.0);
        assert_eq!(store.inventory().len(), 1);
    }

    #[test]
    fn test_add_merges_with_unit_conversion() {
        let mut store = MemoryStore::new();
        let id = broccoli(&mut store);

        add(&mut store, ItemRef::Ingredient(id), 2.0, "serving");
        // 170 g = 2 servings; entry stays in servings
        let entry = add(&mut store, ItemRef::Ingredient(id), 170.0, "g");
        assert_eq!(store.inventory().len(), 1);
        assert!((entry.quantity - 4.0).abs() < 1e-9);
        assert_eq!(entry.unit, "serving");
    }

    #[test]
    fn test_partial_consume_leaves_remainder() {
        let mut store = MemoryStore::new();
        let id = broccoli(&mut store);
        add(&mut store, ItemRef::Ingredient(id), 5.0, "serving");

        let outcome = consume(&mut store, ItemRef::Ingredient(id), 2.0, "serving");
        assert!(!outcome.depleted);
        assert!(outcome.shortfall.is_none());

        let entry = store.inventory_for(ItemRef::Ingredient(id)).unwrap();
        assert!((entry.quantity - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_exact_depletion_removes_entry_and_reports() {
        let mut store = MemoryStore::new();
        let id = broccoli(&mut store);
        add(&mut store, ItemRef::Ingredient(id), 5.0, "serving");

        let outcome = consume(&mut store, ItemRef::Ingredient(id), 5.0, "serving");
        assert!(outcome.depleted);
        let shortfall = outcome.shortfall.unwrap();
        assert_eq!(shortfall.had, 5.0);
        assert_eq!(shortfall.needed, 5.0);
        assert_eq!(shortfall.unit, "serving");
        assert!(store.inventory_for(ItemRef::Ingredient(id)).is_none());
    }

    #[test]
    fn test_over_consume_never_persists_negative() {
        let mut store = MemoryStore::new();
        let id = broccoli(&mut store);
        add(&mut store, ItemRef::Ingredient(id), 3.0, "serving");

        let outcome = consume(&mut store, ItemRef::Ingredient(id), 10.0, "serving");
        assert!(outcome.depleted);
        assert_eq!(outcome.shortfall.unwrap().had, 3.0);
        assert!(store.inventory().is_empty());
    }

    #[test]
    fn test_consume_converts_into_entry_unit() {
        let mut store = MemoryStore::new();
        let id = broccoli(&mut store);
        add(&mut store, ItemRef::Ingredient(id), 5.0, "serving");

        // 85 g = 1 serving
        let outcome = consume(&mut store, ItemRef::Ingredient(id), 85.0, "g");
        assert!(outcome.shortfall.is_none());
        let entry = store.inventory_for(ItemRef::Ingredient(id)).unwrap();
        assert!((entry.quantity - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_absent_inventory_reports_had_zero() {
        let mut store = MemoryStore::new();
        let id = broccoli(&mut store);

        let outcome = consume(&mut store, ItemRef::Ingredient(id), 1.0, "serving");
        assert!(!outcome.depleted);
        let shortfall = outcome.shortfall.unwrap();
        assert_eq!(shortfall.had, 0.0);
        assert_eq!(shortfall.needed, 1.0);
        assert_eq!(shortfall.name, "Broccoli");
    }
}
