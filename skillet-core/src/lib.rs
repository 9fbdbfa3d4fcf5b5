//! Unit-conversion and nutrient-aggregation engine for the skillet meal
//! planner.
//!
//! The surrounding application is mostly CRUD; this crate holds the part
//! with actual math: converting between an ingredient's registered units,
//! scaling per-serving nutrient profiles by logged quantities, deriving
//! recipe nutrient totals from ingredient lines, depleting inventory with
//! shortfall reporting, and summing logged nutrients against goals.
//!
//! Everything is synchronous and operates through the [`Datastore`] seam;
//! see `store` for the concurrency contract a persistent backend must
//! provide.

pub mod catalog;
pub mod convert;
pub mod error;
pub mod inventory;
pub mod logbook;
pub mod memory;
pub mod nutrients;
pub mod report;
pub mod store;
pub mod types;

pub use convert::{convert_or_keep, default_unit, find_unit, try_convert};
pub use error::{CatalogError, ConvertError, NutrientError};
pub use inventory::{AssembleOutcome, ConsumeOutcome};
pub use logbook::{LogOutcome, Meal};
pub use memory::MemoryStore;
pub use report::NutrientTotal;
pub use store::Datastore;
pub use types::{
    FoodLogEntry, FoodLogNutrient, Goal, Ingredient, IngredientUnit, InventoryEntry, ItemRef,
    NutrientAmount, NutrientContribution, Recipe, RecipeIngredient, RecipeNutrientTotal,
    Shortfall,
};
