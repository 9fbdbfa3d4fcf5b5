//! Persistence seam for the engine.
//!
//! The algorithms in this crate never reach into a global store; they take a
//! [`Datastore`] so production code can back them with a real database and
//! tests can use [`crate::memory::MemoryStore`].
//!
//! All lookups are synchronous and operate on a request-scoped snapshot.
//! Inventory mutations are read-modify-write: when a `Datastore` is backed
//! by shared persistent storage, the implementation must serialize
//! `set_inventory_quantity`/`delete_inventory` per user (row-level locking
//! or atomic decrement). The engine relies on that contract but does not
//! implement it.

use uuid::Uuid;

use crate::types::{
    FoodLogEntry, FoodLogNutrient, Goal, Ingredient, IngredientUnit, InventoryEntry, ItemRef,
    NutrientAmount, Recipe, RecipeIngredient, RecipeNutrientTotal,
};

pub trait Datastore {
    // Ingredients and their units/nutrient profiles
    fn ingredient(&self, id: Uuid) -> Option<Ingredient>;
    fn ingredients(&self) -> Vec<Ingredient>;
    fn insert_ingredient(&mut self, ingredient: Ingredient);

    /// All units registered for one ingredient, in insertion order.
    fn units_for(&self, ingredient_id: Uuid) -> Vec<IngredientUnit>;
    fn insert_unit(&mut self, unit: IngredientUnit);

    fn nutrients_for(&self, ingredient_id: Uuid) -> Vec<NutrientAmount>;
    fn insert_nutrient(&mut self, nutrient: NutrientAmount);

    // Recipes
    fn recipe(&self, id: Uuid) -> Option<Recipe>;
    fn recipes(&self) -> Vec<Recipe>;
    fn insert_recipe(&mut self, recipe: Recipe);

    fn recipe_ingredients(&self, recipe_id: Uuid) -> Vec<RecipeIngredient>;
    fn insert_recipe_ingredient(&mut self, line: RecipeIngredient);

    fn recipe_nutrients(&self, recipe_id: Uuid) -> Vec<RecipeNutrientTotal>;
    fn insert_recipe_nutrient(&mut self, total: RecipeNutrientTotal);

    // Inventory
    fn inventory(&self) -> Vec<InventoryEntry>;
    /// The single entry for an item, if any. Quantities are never split
    /// across two entries for the same item.
    fn inventory_for(&self, item: ItemRef) -> Option<InventoryEntry>;
    fn insert_inventory(&mut self, entry: InventoryEntry);
    fn set_inventory_quantity(&mut self, id: Uuid, quantity: f64);
    fn delete_inventory(&mut self, id: Uuid);

    // Food logs and their nutrient snapshots
    fn food_logs(&self) -> Vec<FoodLogEntry>;
    fn insert_food_log(&mut self, entry: FoodLogEntry);
    fn food_log_nutrients(&self, food_log_id: Uuid) -> Vec<FoodLogNutrient>;
    fn insert_food_log_nutrients(&mut self, rows: Vec<FoodLogNutrient>);

    // Goals
    fn goals(&self) -> Vec<Goal>;
    fn insert_goal(&mut self, goal: Goal);
    fn set_goal_target(&mut self, id: Uuid, target_amount: f64);
    fn delete_goal(&mut self, id: Uuid);
}
