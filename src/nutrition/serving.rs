//! Serving size parsing
//!
//! Provider serving descriptions look like "150g", "250 ml", "1 cup (152g)"
//! or "2 biscuits (30 g)". Only gram and milliliter amounts are understood.

use crate::models::rounding::{round_half_up, round_tenths};
use crate::models::Nutrition;

/// Grams assumed when a serving description has no usable amount
pub const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// Extract the serving amount in grams (or ml, treated 1:1)
///
/// The first number directly followed by `g` wins; failing that, the first
/// number followed by `ml`. Whitespace between number and unit is allowed.
pub fn parse_serving_grams(serving: Option<&str>) -> f64 {
    let Some(text) = serving else {
        return DEFAULT_SERVING_GRAMS;
    };
    let lower = text.to_lowercase();

    find_amount_with_unit(&lower, "g")
        .or_else(|| find_amount_with_unit(&lower, "ml"))
        .unwrap_or(DEFAULT_SERVING_GRAMS)
}

/// Scan for `<digits/dots><whitespace*><unit>` and parse the number
fn find_amount_with_unit(text: &str, unit: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if !is_number_byte(bytes[i]) {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && is_number_byte(bytes[i]) {
            i += 1;
        }
        let number = &text[start..i];

        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }

        if text[j..].starts_with(unit) {
            if let Some(value) = parse_leading_float(number) {
                return Some(value);
            }
        }
    }

    None
}

fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.'
}

/// Parse the longest valid float prefix ("1.5.2" -> 1.5)
fn parse_leading_float(s: &str) -> Option<f64> {
    (1..=s.len())
        .rev()
        .find_map(|end| s[..end].parse::<f64>().ok())
}

/// Convert per-100g values to one serving of `grams`
///
/// Calories round to whole kcal, macros to one decimal.
pub fn per_100g_to_serving(per_100g: &Nutrition, grams: f64) -> Nutrition {
    let factor = grams / 100.0;
    let scaled = per_100g.scale(factor);
    Nutrition {
        calories: round_half_up(scaled.calories),
        protein: round_tenths(scaled.protein),
        carbs: round_tenths(scaled.carbs),
        fat: round_tenths(scaled.fat),
        fiber: round_tenths(scaled.fiber),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_grams() {
        assert_eq!(parse_serving_grams(Some("150g")), 150.0);
        assert_eq!(parse_serving_grams(Some("30 G")), 30.0);
        assert_eq!(parse_serving_grams(Some("12.5g")), 12.5);
    }

    #[test]
    fn test_parse_milliliters() {
        assert_eq!(parse_serving_grams(Some("250 ml")), 250.0);
        assert_eq!(parse_serving_grams(Some("330ML")), 330.0);
    }

    #[test]
    fn test_parse_annotated_serving() {
        assert_eq!(parse_serving_grams(Some("1 cup (152g)")), 152.0);
        assert_eq!(parse_serving_grams(Some("2 biscuits (30 g)")), 30.0);
    }

    #[test]
    fn test_grams_preferred_over_ml() {
        assert_eq!(parse_serving_grams(Some("1 can 330ml (340g)")), 340.0);
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(parse_serving_grams(None), 100.0);
        assert_eq!(parse_serving_grams(Some("1 serving")), 100.0);
        assert_eq!(parse_serving_grams(Some("")), 100.0);
        assert_eq!(parse_serving_grams(Some(". g")), 100.0);
    }

    #[test]
    fn test_per_100g_to_serving() {
        let per_100g = Nutrition { calories: 250.0, protein: 10.0, carbs: 30.0, fat: 9.0, fiber: 3.0 };
        let n = per_100g_to_serving(&per_100g, 150.0);
        assert_eq!(n.calories, 375.0);
        assert_eq!(n.protein, 15.0);
        assert_eq!(n.carbs, 45.0);
        assert_eq!(n.fat, 13.5);
        assert_eq!(n.fiber, 4.5);
    }
}
