//! Aggregation of logged nutrients and progress against goals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Datastore;
use crate::types::{FoodLogNutrient, Goal};

/// Summed amount for one nutrient key over a window of log entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotal {
    pub amount: f64,
    pub unit: String,
}

/// Sum snapshot rows grouped by nutrient key.
///
/// The unit is taken from the first row seen for each key; rows for one key
/// are written unit-consistent at log time and are not re-validated here.
pub fn totals_for_window(rows: &[FoodLogNutrient]) -> BTreeMap<String, NutrientTotal> {
    let mut totals: BTreeMap<String, NutrientTotal> = BTreeMap::new();
    for row in rows {
        totals
            .entry(row.nutrient_key.clone())
            .and_modify(|t| t.amount += row.amount)
            .or_insert_with(|| NutrientTotal {
                amount: row.amount,
                unit: row.unit.clone(),
            });
    }
    totals
}

/// Totals across every log entry on one calendar day (UTC).
pub fn totals_for_day<S: Datastore>(store: &S, date: NaiveDate) -> BTreeMap<String, NutrientTotal> {
    let mut rows = Vec::new();
    for log in store.food_logs() {
        if log.logged_at.date_naive() == date {
            rows.extend(store.food_log_nutrients(log.id));
        }
    }
    totals_for_window(&rows)
}

/// Percent of the goal target consumed for one nutrient key.
///
/// Unclamped; values over 100 are the display layer's problem. Returns
/// `None` when no goal exists for the key. A key with a goal but no logged
/// amount reports 0.
pub fn progress(
    nutrient_key: &str,
    totals: &BTreeMap<String, NutrientTotal>,
    goals: &[Goal],
) -> Option<f64> {
    let goal = goals.iter().find(|g| g.nutrient_key == nutrient_key)?;
    let consumed = totals.get(nutrient_key).map_or(0.0, |t| t.amount);
    Some(consumed / goal.target_amount * 100.0)
}
