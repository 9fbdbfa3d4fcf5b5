//! Food logging: the flow that ties the calculator and the ledger together.
//!
//! Logging captures a nutrient snapshot at write time. The snapshot rows are
//! what reporting reads later; editing an ingredient's profile afterwards
//! never changes history.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::NutrientError;
use crate::inventory;
use crate::nutrients;
use crate::store::Datastore;
use crate::types::{
    FoodLogEntry, FoodLogNutrient, Ingredient, ItemRef, Recipe, Shortfall,
};

/// Result of logging food: the persisted entry, its nutrient snapshot, and
/// any inventory warnings.
#[derive(Debug, Clone)]
pub struct LogOutcome {
    pub entry: FoodLogEntry,
    pub nutrients: Vec<FoodLogNutrient>,
    pub shortfalls: Vec<Shortfall>,
}

/// A populated log entry for display.
#[derive(Debug, Clone)]
pub struct Meal {
    pub entry: FoodLogEntry,
    pub ingredient: Option<Ingredient>,
    pub recipe: Option<Recipe>,
    pub nutrients: Vec<FoodLogNutrient>,
}

/// Log consumption of an ingredient quantity or recipe servings.
///
/// Computes the nutrient contributions, persists the immutable log entry
/// with its snapshot rows, then deducts from inventory. The inventory step
/// is best-effort: shortfalls and missing entries are returned as warnings
/// and never fail the log. Only configuration problems (unknown item, no
/// default unit) abort.
pub fn log_food<S: Datastore>(
    store: &mut S,
    item: ItemRef,
    quantity: f64,
    unit: &str,
    logged_at: DateTime<Utc>,
    meal_type: Option<&str>,
) -> Result<LogOutcome, NutrientError> {
    let contributions = match item {
        ItemRef::Ingredient(id) => nutrients::for_ingredient_quantity(store, id, quantity, unit)?,
        ItemRef::Recipe(id) => nutrients::for_recipe_servings(store, id, quantity)?,
    };

    let entry = FoodLogEntry {
        id: Uuid::new_v4(),
        item,
        quantity,
        unit: unit.to_string(),
        logged_at,
        meal_type: meal_type.map(str::to_string),
        created_at: Utc::now(),
    };
    store.insert_food_log(entry.clone());

    let snapshot: Vec<FoodLogNutrient> = contributions
        .into_iter()
        .map(|c| FoodLogNutrient {
            id: Uuid::new_v4(),
            food_log_id: entry.id,
            nutrient_key: c.nutrient_key,
            amount: c.amount,
            unit: c.unit,
        })
        .collect();
    store.insert_food_log_nutrients(snapshot.clone());

    let outcome = inventory::consume(store, item, quantity, unit);
    let shortfalls: Vec<Shortfall> = outcome.shortfall.into_iter().collect();

    Ok(LogOutcome {
        entry,
        nutrients: snapshot,
        shortfalls,
    })
}

/// The newest `limit` log entries, populated with their item and snapshot.
pub fn recent_meals<S: Datastore>(store: &S, limit: usize) -> Vec<Meal> {
    let mut logs = store.food_logs();
    logs.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
    logs.truncate(limit);

    logs.into_iter()
        .map(|entry| {
            let nutrients = store.food_log_nutrients(entry.id);
            let (ingredient, recipe) = match entry.item {
                ItemRef::Ingredient(id) => (store.ingredient(id), None),
                ItemRef::Recipe(id) => (None, store.recipe(id)),
            };
            Meal {
                entry,
                ingredient,
                recipe,
                nutrients,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, NewIngredient, NewNutrient, NewUnit};
    use crate::memory::MemoryStore;
    use chrono::Duration;

    fn seeded_store() -> (MemoryStore, Uuid) {
        let mut store = MemoryStore::new();
        let id = catalog::create_ingredient(
            &mut store,
            NewIngredient {
                name: "Yogurt".to_string(),
                brand: None,
                servings_per_container: None,
                units: vec![
                    NewUnit::new("serving", 1.0, true),
                    NewUnit::new("g", 175.0, false),
                ],
                nutrients: vec![NewNutrient::new("protein", "g", 10.0)],
            },
        )
        .unwrap()
        .id;
        (store, id)
    }

    #[test]
    fn test_log_persists_entry_and_snapshot() {
        let (mut store, id) = seeded_store();

        let outcome = log_food(
            &mut store,
            ItemRef::Ingredient(id),
            2.0,
            "serving",
            Utc::now(),
            Some("breakfast"),
        )
        .unwrap();

        assert_eq!(store.food_logs().len(), 1);
        let snapshot = store.food_log_nutrients(outcome.entry.id);
        assert_eq!(snapshot.len(), 1);
        assert!((snapshot[0].amount - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_log_without_inventory_still_succeeds() {
        let (mut store, id) = seeded_store();

        let outcome = log_food(
            &mut store,
            ItemRef::Ingredient(id),
            1.0,
            "serving",
            Utc::now(),
            None,
        )
        .unwrap();

        assert_eq!(outcome.shortfalls.len(), 1);
        assert_eq!(outcome.shortfalls[0].had, 0.0);
    }

    #[test]
    fn test_log_deducts_inventory() {
        let (mut store, id) = seeded_store();
        inventory::add(&mut store, ItemRef::Ingredient(id), 4.0, "serving");

        let outcome = log_food(
            &mut store,
            ItemRef::Ingredient(id),
            175.0,
            "g",
            Utc::now(),
            None,
        )
        .unwrap();

        assert!(outcome.shortfalls.is_empty());
        let entry = store.inventory_for(ItemRef::Ingredient(id)).unwrap();
        assert!((entry.quantity - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_survives_profile_edit() {
        let (mut store, id) = seeded_store();
        let outcome = log_food(
            &mut store,
            ItemRef::Ingredient(id),
            1.0,
            "serving",
            Utc::now(),
            None,
        )
        .unwrap();

        // A new nutrient row added after the fact must not appear in the
        // already-captured snapshot.
        store.insert_nutrient(crate::types::NutrientAmount {
            id: Uuid::new_v4(),
            ingredient_id: id,
            nutrient_key: "calcium".to_string(),
            unit: "mg".to_string(),
            amount: 300.0,
            created_at: Utc::now(),
        });

        let snapshot = store.food_log_nutrients(outcome.entry.id);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].nutrient_key, "protein");
    }

    #[test]
    fn test_recent_meals_newest_first() {
        let (mut store, id) = seeded_store();
        let base = Utc::now();

        for offset in 0..3 {
            log_food(
                &mut store,
                ItemRef::Ingredient(id),
                1.0,
                "serving",
                base + Duration::hours(offset),
                None,
            )
            .unwrap();
        }

        let meals = recent_meals(&store, 2);
        assert_eq!(meals.len(), 2);
        assert!(meals[0].entry.logged_at > meals[1].entry.logged_at);
        assert_eq!(meals[0].ingredient.as_ref().unwrap().name, "Yogurt");
    }
}
