//! Nutrient calculation for logged quantities.
//!
//! Ingredient profiles are stored per reference serving; recipe profiles are
//! stored as totals for the entire yield. Both entry points scale those
//! stored amounts by a servings factor and pass the nutrient's own unit of
//! measure through unchanged.

use uuid::Uuid;

use crate::convert;
use crate::error::NutrientError;
use crate::store::Datastore;
use crate::types::NutrientContribution;

/// Nutrient contributions for logging `quantity` of an ingredient in
/// `unit_name`.
///
/// The ingredient's default unit anchors the servings computation; its
/// absence is a hard error (there is no reference to scale against). An
/// unregistered `unit_name` falls back leniently: the raw quantity is
/// treated as being in default units, with a warning (see
/// [`convert::convert_or_keep`]).
///
/// An ingredient with no nutrient rows yields an empty list, and a zero
/// quantity yields all-zero amounts; neither is an error.
pub fn for_ingredient_quantity<S: Datastore>(
    store: &S,
    ingredient_id: Uuid,
    quantity: f64,
    unit_name: &str,
) -> Result<Vec<NutrientContribution>, NutrientError> {
    if store.ingredient(ingredient_id).is_none() {
        return Err(NutrientError::UnknownIngredient(ingredient_id));
    }

    let units = store.units_for(ingredient_id);
    let default =
        convert::default_unit(&units).ok_or(NutrientError::NoDefaultUnit(ingredient_id))?;

    // Quantity in default units, divided by the default unit's per-serving
    // amount, gives reference servings. Example: 2 cups of rice with
    // cup.amount = 0.243 converts to 2 / 0.243 ≈ 8.23 servings.
    let in_default =
        convert::convert_or_keep(ingredient_id, &units, quantity, unit_name, &default.unit_name);
    let servings = in_default / default.amount;

    Ok(store
        .nutrients_for(ingredient_id)
        .into_iter()
        .map(|n| NutrientContribution {
            nutrient_key: n.nutrient_key,
            amount: n.amount * servings,
            unit: n.unit,
        })
        .collect())
}

/// Nutrient contributions for logging `servings` of a recipe.
///
/// Scales the recipe's stored whole-yield totals by
/// `servings / recipe.servings`. A recipe with no stored totals yields an
/// empty list.
pub fn for_recipe_servings<S: Datastore>(
    store: &S,
    recipe_id: Uuid,
    servings: f64,
) -> Result<Vec<NutrientContribution>, NutrientError> {
    let recipe = store
        .recipe(recipe_id)
        .ok_or(NutrientError::UnknownRecipe(recipe_id))?;

    let ratio = servings / recipe.servings;

    Ok(store
        .recipe_nutrients(recipe_id)
        .into_iter()
        .map(|n| NutrientContribution {
            nutrient_key: n.nutrient_key,
            amount: n.total_amount * ratio,
            unit: n.unit,
        })
        .collect())
}

/// Sum contributions grouped by nutrient key, preserving first-seen order.
///
/// The unit comes from the first contribution seen for each key;
/// contributions for one key are written unit-consistent upstream.
pub fn sum_contributions<I>(contributions: I) -> Vec<NutrientContribution>
where
    I: IntoIterator<Item = NutrientContribution>,
{
    let mut totals: Vec<NutrientContribution> = Vec::new();
    for c in contributions {
        match totals.iter_mut().find(|t| t.nutrient_key == c.nutrient_key) {
            Some(t) => t.amount += c.amount,
            None => totals.push(c),
        }
    }
    totals
}
