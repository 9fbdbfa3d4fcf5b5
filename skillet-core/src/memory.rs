//! In-memory [`Datastore`] used by demo mode and tests.
//!
//! Plain vectors, filtered on read. Row counts in demo mode are tiny, so
//! linear scans are fine and keep insertion order observable (the unit
//! registry and nutrient listings preserve input order).

use chrono::Utc;
use uuid::Uuid;

use crate::store::Datastore;
use crate::types::{
    FoodLogEntry, FoodLogNutrient, Goal, Ingredient, IngredientUnit, InventoryEntry, ItemRef,
    NutrientAmount, Recipe, RecipeIngredient, RecipeNutrientTotal,
};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    ingredients: Vec<Ingredient>,
    units: Vec<IngredientUnit>,
    nutrient_amounts: Vec<NutrientAmount>,
    recipes: Vec<Recipe>,
    recipe_ingredients: Vec<RecipeIngredient>,
    recipe_nutrients: Vec<RecipeNutrientTotal>,
    inventory: Vec<InventoryEntry>,
    food_logs: Vec<FoodLogEntry>,
    food_log_nutrients: Vec<FoodLogNutrient>,
    goals: Vec<Goal>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Datastore for MemoryStore {
    fn ingredient(&self, id: Uuid) -> Option<Ingredient> {
        self.ingredients.iter().find(|i| i.id == id).cloned()
    }

    fn ingredients(&self) -> Vec<Ingredient> {
        self.ingredients.clone()
    }

    fn insert_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
    }

    fn units_for(&self, ingredient_id: Uuid) -> Vec<IngredientUnit> {
        self.units
            .iter()
            .filter(|u| u.ingredient_id == ingredient_id)
            .cloned()
            .collect()
    }

    fn insert_unit(&mut self, unit: IngredientUnit) {
        self.units.push(unit);
    }

    fn nutrients_for(&self, ingredient_id: Uuid) -> Vec<NutrientAmount> {
        self.nutrient_amounts
            .iter()
            .filter(|n| n.ingredient_id == ingredient_id)
            .cloned()
            .collect()
    }

    fn insert_nutrient(&mut self, nutrient: NutrientAmount) {
        self.nutrient_amounts.push(nutrient);
    }

    fn recipe(&self, id: Uuid) -> Option<Recipe> {
        self.recipes.iter().find(|r| r.id == id).cloned()
    }

    fn recipes(&self) -> Vec<Recipe> {
        self.recipes.clone()
    }

    fn insert_recipe(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    fn recipe_ingredients(&self, recipe_id: Uuid) -> Vec<RecipeIngredient> {
        self.recipe_ingredients
            .iter()
            .filter(|ri| ri.recipe_id == recipe_id)
            .cloned()
            .collect()
    }

    fn insert_recipe_ingredient(&mut self, line: RecipeIngredient) {
        self.recipe_ingredients.push(line);
    }

    fn recipe_nutrients(&self, recipe_id: Uuid) -> Vec<RecipeNutrientTotal> {
        self.recipe_nutrients
            .iter()
            .filter(|rn| rn.recipe_id == recipe_id)
            .cloned()
            .collect()
    }

    fn insert_recipe_nutrient(&mut self, total: RecipeNutrientTotal) {
        self.recipe_nutrients.push(total);
    }

    fn inventory(&self) -> Vec<InventoryEntry> {
        self.inventory.clone()
    }

    fn inventory_for(&self, item: ItemRef) -> Option<InventoryEntry> {
        self.inventory.iter().find(|e| e.item == item).cloned()
    }

    fn insert_inventory(&mut self, entry: InventoryEntry) {
        self.inventory.push(entry);
    }

    fn set_inventory_quantity(&mut self, id: Uuid, quantity: f64) {
        if let Some(entry) = self.inventory.iter_mut().find(|e| e.id == id) {
            entry.quantity = quantity;
            entry.updated_at = Utc::now();
        }
    }

    fn delete_inventory(&mut self, id: Uuid) {
        self.inventory.retain(|e| e.id != id);
    }

    fn food_logs(&self) -> Vec<FoodLogEntry> {
        self.food_logs.clone()
    }

    fn insert_food_log(&mut self, entry: FoodLogEntry) {
        self.food_logs.push(entry);
    }

    fn food_log_nutrients(&self, food_log_id: Uuid) -> Vec<FoodLogNutrient> {
        self.food_log_nutrients
            .iter()
            .filter(|n| n.food_log_id == food_log_id)
            .cloned()
            .collect()
    }

    fn insert_food_log_nutrients(&mut self, rows: Vec<FoodLogNutrient>) {
        self.food_log_nutrients.extend(rows);
    }

    fn goals(&self) -> Vec<Goal> {
        self.goals.clone()
    }

    fn insert_goal(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    fn set_goal_target(&mut self, id: Uuid, target_amount: f64) {
        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) {
            goal.target_amount = target_amount;
            goal.updated_at = Utc::now();
        }
    }

    fn delete_goal(&mut self, id: Uuid) {
        self.goals.retain(|g| g.id != id);
    }
}
