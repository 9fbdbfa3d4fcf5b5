use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The thing an inventory entry or food log points at.
///
/// The database schema this mirrors stores two nullable foreign keys with an
/// exactly-one-set constraint; the enum makes the invalid states
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ItemRef {
    Ingredient(Uuid),
    Recipe(Uuid),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub servings_per_container: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// A named unit registered for one ingredient.
///
/// `amount` is how many of this unit make up exactly one reference serving.
/// For rice with a 45 g serving: unit "g" has amount 45, unit "cup" has
/// amount 0.243, unit "serving" has amount 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientUnit {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    pub unit_name: String,
    pub amount: f64,
    /// At most one unit per ingredient carries this flag; it is the
    /// conversion pivot and the unit shown when none is specified.
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Nutrient content of one reference serving of an ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientAmount {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    pub nutrient_key: String,
    /// Unit the nutrient itself is measured in ("g", "mg", "kcal").
    pub unit: String,
    /// Amount per one reference serving.
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Number of servings the whole recipe yields.
    pub servings: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One ingredient line of a recipe: the amount needed for the entire yield,
/// in a named unit of that ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub ingredient_id: Uuid,
    pub quantity: f64,
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

/// Pre-computed nutrient total for a recipe's entire yield.
///
/// Derived from the ingredient lines at recipe creation; not recomputed when
/// ingredient profiles are later edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeNutrientTotal {
    pub recipe_id: Uuid,
    pub nutrient_key: String,
    pub unit: String,
    pub total_amount: f64,
}

/// Quantity on hand of an ingredient or an assembled recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub id: Uuid,
    pub item: ItemRef,
    pub quantity: f64,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A logged consumption event. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: Uuid,
    pub item: ItemRef,
    pub quantity: f64,
    pub unit: String,
    pub logged_at: DateTime<Utc>,
    pub meal_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Nutrient snapshot row captured when a food log entry is created.
///
/// Amounts are frozen at log time so later edits to an ingredient's profile
/// never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogNutrient {
    pub id: Uuid,
    pub food_log_id: Uuid,
    pub nutrient_key: String,
    pub amount: f64,
    pub unit: String,
}

/// Per-nutrient daily target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub nutrient_key: String,
    pub target_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A computed (nutrient key, amount, unit) triple for one logged quantity of
/// an ingredient or recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientContribution {
    pub nutrient_key: String,
    pub amount: f64,
    pub unit: String,
}

/// Inventory that was insufficient (or absent) for a consumption request.
///
/// A shortfall is a warning, never a failure: the consumption that produced
/// it still succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    /// Display name of the ingredient or recipe.
    pub name: String,
    /// Quantity that was on hand, in `unit`. Zero when nothing was tracked.
    pub had: f64,
    /// Quantity the consumption asked for, in `unit`.
    pub needed: f64,
    pub unit: String,
}

impl Shortfall {
    /// Human-readable warning line for UI display.
    pub fn message(&self) -> String {
        format!(
            "{}: had {:.2} {}, needed {:.2} {}",
            self.name, self.had, self.unit, self.needed, self.unit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ref_serde_shape() {
        let id = Uuid::nil();
        let json = serde_json::to_value(ItemRef::Ingredient(id)).unwrap();
        assert_eq!(json["kind"], "ingredient");
        assert_eq!(json["id"], id.to_string());

        let back: ItemRef = serde_json::from_value(json).unwrap();
        assert_eq!(back, ItemRef::Ingredient(id));
    }

    #[test]
    fn test_shortfall_message_rounds_for_display() {
        let shortfall = Shortfall {
            name: "Rice".to_string(),
            had: 1.2345,
            needed: 2.0,
            unit: "cup".to_string(),
        };
        assert_eq!(shortfall.message(), "Rice: had 1.23 cup, needed 2.00 cup");
    }
}
