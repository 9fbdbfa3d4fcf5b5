use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("no unit named {unit:?} registered for ingredient {ingredient_id}")]
    UnknownUnit { ingredient_id: Uuid, unit: String },
}

#[derive(Error, Debug)]
pub enum NutrientError {
    #[error("ingredient {0} not found")]
    UnknownIngredient(Uuid),

    #[error("recipe {0} not found")]
    UnknownRecipe(Uuid),

    #[error("ingredient {0} has no default unit; cannot compute servings")]
    NoDefaultUnit(Uuid),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("ingredient must have at least one unit")]
    NoUnits,

    #[error("more than one unit flagged as default")]
    MultipleDefaultUnits,

    #[error("duplicate unit name {0:?}")]
    DuplicateUnit(String),

    #[error("duplicate nutrient key {0:?}")]
    DuplicateNutrient(String),

    #[error("recipe servings must be positive, got {0}")]
    NonPositiveServings(f64),

    #[error("a goal for nutrient {0:?} already exists")]
    DuplicateGoal(String),

    #[error("goal {0} not found")]
    UnknownGoal(Uuid),

    #[error("goal target must be positive, got {0}")]
    NonPositiveTarget(f64),

    #[error(transparent)]
    Nutrient(#[from] NutrientError),
}
