//! Local food table
//!
//! Fallback reference data for the resolver plus simple browse helpers.
//! Entries are per serving and kept in a fixed order; lookups return the
//! first match in that order.

use rand::seq::SliceRandom;

use crate::models::{FoodCategory, FoodRecord};

macro_rules! food {
    ($key:literal, $name:literal, $cal:expr, $carbs:expr, $protein:expr, $fat:expr, $fiber:expr, $serving:literal, $cat:ident) => {
        FoodRecord {
            key: $key,
            name: $name,
            calories: $cal,
            carbs: $carbs,
            protein: $protein,
            fat: $fat,
            fiber: $fiber,
            serving: $serving,
            category: FoodCategory::$cat,
        }
    };
}

pub static FOOD_TABLE: &[FoodRecord] = &[
    // Fruits
    food!("apple", "Apple", 95.0, 25.0, 0.5, 0.3, 4.0, "1 medium (182g)", Fruit),
    food!("banana", "Banana", 105.0, 27.0, 1.3, 0.4, 3.0, "1 medium (118g)", Fruit),
    food!("orange", "Orange", 62.0, 15.4, 1.2, 0.2, 3.1, "1 medium (154g)", Fruit),
    food!("strawberries", "Strawberries", 49.0, 11.7, 1.0, 0.5, 3.0, "1 cup (152g)", Fruit),
    food!("blueberries", "Blueberries", 84.0, 21.4, 1.1, 0.5, 3.6, "1 cup (148g)", Fruit),
    // Vegetables
    food!("broccoli", "Broccoli", 55.0, 11.0, 4.3, 0.6, 5.1, "1 cup (91g)", Vegetable),
    food!("spinach", "Spinach", 7.0, 1.1, 0.9, 0.1, 0.7, "1 cup (30g)", Vegetable),
    food!("carrots", "Carrots", 50.0, 12.0, 1.0, 0.3, 3.6, "1 cup (128g)", Vegetable),
    food!("sweet_potato", "Sweet Potato", 112.0, 26.0, 2.0, 0.1, 3.8, "1 medium (114g)", Vegetable),
    // Proteins
    food!("chicken_breast", "Chicken Breast", 165.0, 0.0, 31.0, 3.6, 0.0, "100g", Protein),
    food!("salmon", "Salmon", 208.0, 0.0, 25.0, 12.0, 0.0, "100g", Protein),
    food!("eggs", "Eggs", 155.0, 1.1, 13.0, 11.0, 0.0, "2 large (100g)", Protein),
    food!("greek_yogurt", "Greek Yogurt", 100.0, 6.0, 17.0, 0.0, 0.0, "1 cup (170g)", Protein),
    food!("tofu", "Tofu", 76.0, 1.9, 8.0, 4.8, 0.3, "100g", Protein),
    // Grains
    food!("brown_rice", "Brown Rice", 111.0, 23.0, 2.6, 0.9, 1.8, "1/2 cup cooked (98g)", Grain),
    food!("quinoa", "Quinoa", 120.0, 22.0, 4.4, 1.9, 2.8, "1/2 cup cooked (92g)", Grain),
    food!("oats", "Oats", 154.0, 27.0, 5.3, 2.6, 4.0, "1/2 cup (40g)", Grain),
    food!("whole_wheat_bread", "Whole Wheat Bread", 81.0, 13.8, 4.0, 1.1, 1.9, "1 slice (28g)", Grain),
    // Nuts & seeds
    food!("almonds", "Almonds", 164.0, 6.1, 6.0, 14.2, 3.5, "1 oz (28g)", Nuts),
    food!("walnuts", "Walnuts", 185.0, 3.9, 4.3, 18.5, 1.9, "1 oz (28g)", Nuts),
    food!("chia_seeds", "Chia Seeds", 137.0, 12.0, 4.4, 8.6, 10.6, "1 oz (28g)", Nuts),
    // Dairy
    food!("milk", "Milk", 103.0, 12.0, 8.0, 2.4, 0.0, "1 cup (244g)", Dairy),
    food!("cheese", "Cheddar Cheese", 113.0, 0.4, 7.0, 9.3, 0.0, "1 oz (28g)", Dairy),
    // Processed
    food!("protein_bar", "Protein Bar", 200.0, 20.0, 15.0, 8.0, 3.0, "1 bar (50g)", Processed),
    food!("granola", "Granola", 471.0, 64.0, 10.0, 20.0, 5.0, "1 cup (122g)", Processed),
];

/// First record whose search phrase appears in the lowercased query
pub fn match_query(table: &'static [FoodRecord], query: &str) -> Option<&'static FoodRecord> {
    let query = query.to_lowercase();
    table.iter().find(|r| query.contains(&r.search_phrase()))
}

pub fn find_by_key(key: &str) -> Option<&'static FoodRecord> {
    FOOD_TABLE.iter().find(|r| r.key == key)
}

/// Case-insensitive substring search over name or category
pub fn search_foods(term: &str) -> Vec<&'static FoodRecord> {
    let term = term.trim().to_lowercase();
    FOOD_TABLE
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&term) || r.category.as_str().contains(&term))
        .collect()
}

pub fn foods_by_category(category: FoodCategory) -> Vec<&'static FoodRecord> {
    FOOD_TABLE.iter().filter(|r| r.category == category).collect()
}

/// Random sample of up to `count` distinct records
pub fn suggest_foods(count: usize) -> Vec<&'static FoodRecord> {
    let mut picks: Vec<&'static FoodRecord> = FOOD_TABLE.iter().collect();
    picks.shuffle(&mut rand::rng());
    picks.truncate(count);
    picks
}
