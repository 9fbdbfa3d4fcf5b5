//! Unit conversion between an ingredient's registered units.
//!
//! Every unit row stores how many of that unit equal one reference serving,
//! so any two units convert through servings:
//! dividing by the source unit's amount yields servings, multiplying by the
//! target unit's amount yields target units. No rounding is applied here;
//! display rounding belongs to the presentation layer.

use uuid::Uuid;

use crate::error::ConvertError;
use crate::types::IngredientUnit;

/// Look up a unit by name within one ingredient's registry slice.
pub fn find_unit<'a>(units: &'a [IngredientUnit], name: &str) -> Option<&'a IngredientUnit> {
    units.iter().find(|u| u.unit_name == name)
}

/// The unit flagged as the reference serving, if one exists.
pub fn default_unit(units: &[IngredientUnit]) -> Option<&IngredientUnit> {
    units.iter().find(|u| u.is_default)
}

/// Convert `quantity` from `source` to `target` units of one ingredient.
///
/// `units` must be the registry slice for `ingredient_id` (the id is only
/// used for error context). Fails when either named unit is unregistered.
pub fn try_convert(
    ingredient_id: Uuid,
    units: &[IngredientUnit],
    quantity: f64,
    source: &str,
    target: &str,
) -> Result<f64, ConvertError> {
    // Identity short-circuit. Required even for names the registry has never
    // seen: callers may pass through an unrecognized-but-identical unit.
    if source == target {
        return Ok(quantity);
    }

    let source_unit = find_unit(units, source).ok_or_else(|| ConvertError::UnknownUnit {
        ingredient_id,
        unit: source.to_string(),
    })?;
    let target_unit = find_unit(units, target).ok_or_else(|| ConvertError::UnknownUnit {
        ingredient_id,
        unit: target.to_string(),
    })?;

    Ok(quantity * (target_unit.amount / source_unit.amount))
}

/// Lenient variant used by the logging and inventory flows: a lookup miss
/// keeps the quantity unchanged, so an incomplete unit table never hard-fails
/// a food log. The miss is reported via `tracing::warn!`.
pub fn convert_or_keep(
    ingredient_id: Uuid,
    units: &[IngredientUnit],
    quantity: f64,
    source: &str,
    target: &str,
) -> f64 {
    match try_convert(ingredient_id, units, quantity, source, target) {
        Ok(converted) => converted,
        Err(err) => {
            tracing::warn!(
                %ingredient_id,
                source,
                target,
                "unit conversion fell back to raw quantity: {err}"
            );
            quantity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn unit(ingredient_id: Uuid, name: &str, amount: f64, is_default: bool) -> IngredientUnit {
        IngredientUnit {
            id: Uuid::new_v4(),
            ingredient_id,
            unit_name: name.to_string(),
            amount,
            is_default,
            created_at: Utc::now(),
        }
    }

    fn rice_units(id: Uuid) -> Vec<IngredientUnit> {
        // 1 serving = 45 g = 0.243 cup
        vec![
            unit(id, "g", 45.0, true),
            unit(id, "cup", 0.243, false),
            unit(id, "serving", 1.0, false),
        ]
    }

    #[test]
    fn test_identity_same_unit() {
        let id = Uuid::new_v4();
        let units = rice_units(id);
        assert_eq!(try_convert(id, &units, 2.5, "cup", "cup").unwrap(), 2.5);
    }

    #[test]
    fn test_identity_unregistered_unit() {
        // Same-name conversion succeeds even when the registry has no such
        // unit at all.
        let id = Uuid::new_v4();
        assert_eq!(try_convert(id, &[], 7.0, "handful", "handful").unwrap(), 7.0);
    }

    #[test]
    fn test_servings_to_cups() {
        let id = Uuid::new_v4();
        let units = rice_units(id);
        // 2 servings = 2 * (0.243 / 1) = 0.486 cups
        let cups = try_convert(id, &units, 2.0, "serving", "cup").unwrap();
        assert!((cups - 0.486).abs() < 1e-9);
    }

    #[test]
    fn test_grams_to_cups() {
        let id = Uuid::new_v4();
        let units = rice_units(id);
        // 90 g = 2 servings = 0.486 cups
        let cups = try_convert(id, &units, 90.0, "g", "cup").unwrap();
        assert!((cups - 0.486).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let id = Uuid::new_v4();
        let units = rice_units(id);
        let there = try_convert(id, &units, 3.7, "g", "cup").unwrap();
        let back = try_convert(id, &units, there, "cup", "g").unwrap();
        assert!((back - 3.7).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_unit_is_error() {
        let id = Uuid::new_v4();
        let units = rice_units(id);
        let err = try_convert(id, &units, 1.0, "scoop", "g").unwrap_err();
        assert!(err.to_string().contains("scoop"));
    }

    #[test]
    fn test_convert_or_keep_falls_back() {
        let id = Uuid::new_v4();
        let units = rice_units(id);
        assert_eq!(convert_or_keep(id, &units, 4.0, "scoop", "g"), 4.0);
    }
}
