//! Catalog operations: creating ingredients and recipes, and the goal
//! lifecycle.
//!
//! This is where the data-model invariants are enforced, at write time:
//! at most one default unit per ingredient, at most one nutrient row per
//! (ingredient, nutrient key), at most one goal per nutrient key, and
//! recipe nutrient totals derived from the ingredient lines exactly once at
//! creation.

use chrono::Utc;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::nutrients;
use crate::store::Datastore;
use crate::types::{
    Goal, Ingredient, IngredientUnit, NutrientAmount, Recipe, RecipeIngredient,
    RecipeNutrientTotal,
};

/// Unit definition supplied at ingredient creation.
#[derive(Debug, Clone)]
pub struct NewUnit {
    pub unit_name: String,
    /// How many of this unit equal one reference serving.
    pub amount: f64,
    pub is_default: bool,
}

impl NewUnit {
    pub fn new(unit_name: &str, amount: f64, is_default: bool) -> Self {
        Self {
            unit_name: unit_name.to_string(),
            amount,
            is_default,
        }
    }
}

/// Per-serving nutrient row supplied at ingredient creation.
#[derive(Debug, Clone)]
pub struct NewNutrient {
    pub nutrient_key: String,
    pub unit: String,
    pub amount: f64,
}

impl NewNutrient {
    pub fn new(nutrient_key: &str, unit: &str, amount: f64) -> Self {
        Self {
            nutrient_key: nutrient_key.to_string(),
            unit: unit.to_string(),
            amount,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub brand: Option<String>,
    pub servings_per_container: Option<f64>,
    pub units: Vec<NewUnit>,
    pub nutrients: Vec<NewNutrient>,
}

/// Create an ingredient with its unit registry and nutrient profile.
///
/// When no unit is flagged default, the first unit in input order becomes
/// the default. This is an explicit creation-time rule; readers never infer
/// a default after the fact.
pub fn create_ingredient<S: Datastore>(
    store: &mut S,
    new: NewIngredient,
) -> Result<Ingredient, CatalogError> {
    if new.units.is_empty() {
        return Err(CatalogError::NoUnits);
    }
    let flagged_defaults = new.units.iter().filter(|u| u.is_default).count();
    if flagged_defaults > 1 {
        return Err(CatalogError::MultipleDefaultUnits);
    }
    for (i, unit) in new.units.iter().enumerate() {
        if new.units[..i].iter().any(|u| u.unit_name == unit.unit_name) {
            return Err(CatalogError::DuplicateUnit(unit.unit_name.clone()));
        }
    }
    for (i, nutrient) in new.nutrients.iter().enumerate() {
        if new.nutrients[..i]
            .iter()
            .any(|n| n.nutrient_key == nutrient.nutrient_key)
        {
            return Err(CatalogError::DuplicateNutrient(
                nutrient.nutrient_key.clone(),
            ));
        }
    }

    let now = Utc::now();
    let ingredient = Ingredient {
        id: Uuid::new_v4(),
        name: new.name,
        brand: new.brand,
        servings_per_container: new.servings_per_container,
        created_at: now,
    };
    store.insert_ingredient(ingredient.clone());

    for (idx, unit) in new.units.into_iter().enumerate() {
        let is_default = if flagged_defaults == 0 {
            idx == 0
        } else {
            unit.is_default
        };
        store.insert_unit(IngredientUnit {
            id: Uuid::new_v4(),
            ingredient_id: ingredient.id,
            unit_name: unit.unit_name,
            amount: unit.amount,
            is_default,
            created_at: now,
        });
    }

    for nutrient in new.nutrients {
        store.insert_nutrient(NutrientAmount {
            id: Uuid::new_v4(),
            ingredient_id: ingredient.id,
            nutrient_key: nutrient.nutrient_key,
            unit: nutrient.unit,
            amount: nutrient.amount,
            created_at: now,
        });
    }

    Ok(ingredient)
}

/// Ingredient line supplied at recipe creation: the amount needed for the
/// entire recipe yield.
#[derive(Debug, Clone)]
pub struct NewRecipeLine {
    pub ingredient_id: Uuid,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub description: Option<String>,
    pub servings: f64,
    pub ingredients: Vec<NewRecipeLine>,
}

/// Create a recipe, its ingredient lines, and its derived nutrient totals.
///
/// Totals are the per-line ingredient contributions summed by nutrient key.
/// They are computed here and only here; editing an ingredient's profile
/// later does not rewrite existing recipes.
pub fn create_recipe<S: Datastore>(
    store: &mut S,
    new: NewRecipe,
) -> Result<Recipe, CatalogError> {
    if new.servings <= 0.0 {
        return Err(CatalogError::NonPositiveServings(new.servings));
    }

    // Validate every line before any insert so a bad line leaves no
    // partial recipe behind.
    let mut contributions = Vec::new();
    for line in &new.ingredients {
        contributions.extend(nutrients::for_ingredient_quantity(
            store,
            line.ingredient_id,
            line.quantity,
            &line.unit,
        )?);
    }

    let now = Utc::now();
    let recipe = Recipe {
        id: Uuid::new_v4(),
        name: new.name,
        description: new.description,
        servings: new.servings,
        created_at: now,
        updated_at: now,
    };
    store.insert_recipe(recipe.clone());

    for line in new.ingredients {
        store.insert_recipe_ingredient(RecipeIngredient {
            id: Uuid::new_v4(),
            recipe_id: recipe.id,
            ingredient_id: line.ingredient_id,
            quantity: line.quantity,
            unit: line.unit,
            created_at: now,
        });
    }

    for total in nutrients::sum_contributions(contributions) {
        store.insert_recipe_nutrient(RecipeNutrientTotal {
            recipe_id: recipe.id,
            nutrient_key: total.nutrient_key,
            unit: total.unit,
            total_amount: total.amount,
        });
    }

    Ok(recipe)
}

/// Create a goal for a nutrient key. One goal per key, positive target.
pub fn create_goal<S: Datastore>(
    store: &mut S,
    nutrient_key: &str,
    target_amount: f64,
) -> Result<Goal, CatalogError> {
    if target_amount <= 0.0 {
        return Err(CatalogError::NonPositiveTarget(target_amount));
    }
    if store
        .goals()
        .iter()
        .any(|g| g.nutrient_key == nutrient_key)
    {
        return Err(CatalogError::DuplicateGoal(nutrient_key.to_string()));
    }

    let now = Utc::now();
    let goal = Goal {
        id: Uuid::new_v4(),
        nutrient_key: nutrient_key.to_string(),
        target_amount,
        created_at: now,
        updated_at: now,
    };
    store.insert_goal(goal.clone());
    Ok(goal)
}

/// Change a goal's target amount. The nutrient key is fixed for the goal's
/// lifetime; only the target moves.
pub fn update_goal<S: Datastore>(
    store: &mut S,
    id: Uuid,
    target_amount: f64,
) -> Result<Goal, CatalogError> {
    if target_amount <= 0.0 {
        return Err(CatalogError::NonPositiveTarget(target_amount));
    }
    let mut goal = store
        .goals()
        .into_iter()
        .find(|g| g.id == id)
        .ok_or(CatalogError::UnknownGoal(id))?;

    store.set_goal_target(id, target_amount);
    goal.target_amount = target_amount;
    goal.updated_at = Utc::now();
    Ok(goal)
}

/// Delete a goal.
pub fn delete_goal<S: Datastore>(store: &mut S, id: Uuid) -> Result<(), CatalogError> {
    if store.goals().iter().all(|g| g.id != id) {
        return Err(CatalogError::UnknownGoal(id));
    }
    store.delete_goal(id);
    Ok(())
}

/// Case-insensitive substring search over ingredient names and brands.
pub fn search_ingredients<S: Datastore>(store: &S, query: &str) -> Vec<Ingredient> {
    let query = query.to_lowercase();
    store
        .ingredients()
        .into_iter()
        .filter(|i| {
            i.name.to_lowercase().contains(&query)
                || i.brand
                    .as_deref()
                    .is_some_and(|b| b.to_lowercase().contains(&query))
        })
        .collect()
}

/// Case-insensitive substring search over recipe names.
pub fn search_recipes<S: Datastore>(store: &S, query: &str) -> Vec<Recipe> {
    let query = query.to_lowercase();
    store
        .recipes()
        .into_iter()
        .filter(|r| r.name.to_lowercase().contains(&query))
        .collect()
}
