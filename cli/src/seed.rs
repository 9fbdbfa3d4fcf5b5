//! Sample catalog, inventory, and goals for demo mode.

use anyhow::{Context, Result};
use skillet_core::catalog::{self, NewIngredient, NewNutrient, NewRecipe, NewRecipeLine, NewUnit};
use skillet_core::{inventory, ItemRef, MemoryStore};
use uuid::Uuid;

struct SeedIngredient {
    name: &'static str,
    brand: Option<&'static str>,
    /// (unit_name, amount per reference serving, is_default)
    units: &'static [(&'static str, f64, bool)],
    /// (nutrient_key, unit, amount per serving)
    nutrients: &'static [(&'static str, &'static str, f64)],
    /// Starting stock: (quantity, unit)
    stock: Option<(f64, &'static str)>,
}

const SAMPLE_INGREDIENTS: &[SeedIngredient] = &[
    SeedIngredient {
        name: "Rice",
        brand: None,
        units: &[("g", 45.0, true), ("cup", 0.243, false)],
        nutrients: &[
            ("calories", "kcal", 160.0),
            ("protein", "g", 3.0),
            ("total_carbs", "g", 35.0),
        ],
        stock: Some((900.0, "g")),
    },
    SeedIngredient {
        name: "Black Beans",
        brand: Some("Goya"),
        units: &[("g", 130.0, true), ("can", 0.33, false)],
        nutrients: &[
            ("calories", "kcal", 120.0),
            ("protein", "g", 8.0),
            ("fiber", "g", 7.0),
        ],
        stock: Some((520.0, "g")),
    },
    SeedIngredient {
        name: "Broccoli",
        brand: None,
        units: &[("serving", 1.0, true), ("g", 85.0, false)],
        nutrients: &[
            ("calories", "kcal", 30.0),
            ("protein", "g", 2.5),
            ("fiber", "g", 2.4),
        ],
        stock: Some((5.0, "serving")),
    },
    SeedIngredient {
        name: "Olive Oil",
        brand: None,
        units: &[("tbsp", 1.0, true), ("ml", 15.0, false)],
        nutrients: &[("calories", "kcal", 119.0), ("total_fat", "g", 14.0)],
        // Deliberately untracked so the demo shows a had-zero shortfall.
        stock: None,
    },
    SeedIngredient {
        name: "Greek Yogurt",
        brand: Some("Fage"),
        units: &[("serving", 1.0, true), ("g", 170.0, false)],
        nutrients: &[
            ("calories", "kcal", 100.0),
            ("protein", "g", 18.0),
            ("calcium", "mg", 190.0),
        ],
        stock: Some((4.0, "serving")),
    },
];

/// (recipe name, servings, lines as (ingredient name, quantity, unit))
const SAMPLE_RECIPES: &[(&str, f64, &[(&str, f64, &str)])] = &[(
    "Rice and Bean Bowl",
    4.0,
    &[
        ("Rice", 360.0, "g"),
        ("Black Beans", 390.0, "g"),
        ("Broccoli", 2.0, "serving"),
        ("Olive Oil", 2.0, "tbsp"),
    ],
)];

const SAMPLE_GOALS: &[(&str, f64)] = &[
    ("calories", 2200.0),
    ("protein", 120.0),
    ("fiber", 30.0),
];

/// Build a store populated with the sample data.
///
/// Returns the store along with ingredient and recipe ids keyed by name so
/// callers can address items without re-querying.
pub fn seed() -> Result<(MemoryStore, Vec<(String, Uuid)>, Vec<(String, Uuid)>)> {
    let mut store = MemoryStore::new();
    let mut ingredient_ids = Vec::new();

    for sample in SAMPLE_INGREDIENTS {
        let ingredient = catalog::create_ingredient(
            &mut store,
            NewIngredient {
                name: sample.name.to_string(),
                brand: sample.brand.map(str::to_string),
                servings_per_container: None,
                units: sample
                    .units
                    .iter()
                    .map(|(name, amount, is_default)| NewUnit::new(name, *amount, *is_default))
                    .collect(),
                nutrients: sample
                    .nutrients
                    .iter()
                    .map(|(key, unit, amount)| NewNutrient::new(key, unit, *amount))
                    .collect(),
            },
        )
        .with_context(|| format!("seeding ingredient {:?}", sample.name))?;

        if let Some((quantity, unit)) = sample.stock {
            inventory::add(
                &mut store,
                ItemRef::Ingredient(ingredient.id),
                quantity,
                unit,
            );
        }
        ingredient_ids.push((sample.name.to_string(), ingredient.id));
    }

    let mut recipe_ids = Vec::new();
    for (name, servings, lines) in SAMPLE_RECIPES {
        let ingredients = lines
            .iter()
            .map(|(ingredient_name, quantity, unit)| {
                let id = ingredient_ids
                    .iter()
                    .find(|(n, _)| n == ingredient_name)
                    .map(|(_, id)| *id)
                    .with_context(|| format!("unknown seed ingredient {ingredient_name:?}"))?;
                Ok(NewRecipeLine {
                    ingredient_id: id,
                    quantity: *quantity,
                    unit: unit.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let recipe = catalog::create_recipe(
            &mut store,
            NewRecipe {
                name: name.to_string(),
                description: None,
                servings: *servings,
                ingredients,
            },
        )
        .with_context(|| format!("seeding recipe {name:?}"))?;
        recipe_ids.push((name.to_string(), recipe.id));
    }

    for (key, target) in SAMPLE_GOALS {
        catalog::create_goal(&mut store, key, *target)
            .with_context(|| format!("seeding goal {key:?}"))?;
    }

    Ok((store, ingredient_ids, recipe_ids))
}
