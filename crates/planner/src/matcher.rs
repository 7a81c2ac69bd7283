//! Name-based ingredient matching.
//!
//! There is no stable key between recipe lines and inventory items, so every
//! scorer goes through these functions. Swapping the policy (normalized keys,
//! fuzzy matching) only touches this module.

use crate::model::{Ingredient, Recipe};

/// Whether two ingredient names refer to the same thing.
///
/// Case-insensitive substring containment in either direction, so
/// "鶏肉" matches "鶏むね肉" and "Milk" matches "whole milk".
pub fn ingredients_refer_to_same_thing(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// One-directional case-insensitive containment of `fragment` in `name`
pub fn contains_fragment(name: &str, fragment: &str) -> bool {
    name.to_lowercase().contains(&fragment.to_lowercase())
}

/// First inventory ingredient matching `name`, in inventory order
pub fn find_in_inventory<'a>(name: &str, inventory: &'a [Ingredient]) -> Option<&'a Ingredient> {
    inventory
        .iter()
        .find(|ingredient| ingredients_refer_to_same_thing(&ingredient.name, name))
}

/// Inventory ingredients consumed by a recipe: for each recipe line, the
/// first matching inventory item. May contain duplicates when two lines
/// resolve to the same item.
pub fn matched_inventory<'r, 'i>(
    recipe: &'r Recipe,
    inventory: &'i [Ingredient],
) -> impl Iterator<Item = &'i Ingredient> {
    recipe
        .ingredients
        .iter()
        .filter_map(move |line| find_in_inventory(&line.name, inventory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeIngredient;

    #[test]
    fn test_match_is_bidirectional() {
        assert!(ingredients_refer_to_same_thing("鶏むね肉", "鶏肉"));
        assert!(!ingredients_refer_to_same_thing("鶏むね肉", "鶏もも肉"));
        assert!(ingredients_refer_to_same_thing("milk", "Whole Milk"));
        assert!(ingredients_refer_to_same_thing("Whole Milk", "milk"));
    }

    #[test]
    fn test_contains_fragment_is_one_directional() {
        assert!(contains_fragment("無調整豆乳", "豆乳"));
        assert!(!contains_fragment("豆乳", "無調整豆乳"));
        assert!(contains_fragment("Green Peppers", "pepper"));
    }

    #[test]
    fn test_find_in_inventory_returns_first_match() {
        let inventory = vec![
            Ingredient::new("a", "豚肉こま切れ"),
            Ingredient::new("b", "豚肉ロース"),
        ];

        let found = find_in_inventory("豚肉", &inventory).unwrap();
        assert_eq!(found.id, "a");
        assert!(find_in_inventory("牛肉", &inventory).is_none());
    }

    #[test]
    fn test_matched_inventory_follows_recipe_lines() {
        let inventory = vec![Ingredient::new("onion", "玉ねぎ"), Ingredient::new("pork", "豚肉")];
        let recipe = Recipe::new(
            "r1",
            "生姜焼き",
            vec![
                RecipeIngredient::new("豚肉", 200.0, "g"),
                RecipeIngredient::new("生姜", 1.0, "片"),
                RecipeIngredient::new("玉ねぎ", 0.5, "個"),
            ],
        );

        let ids: Vec<_> = matched_inventory(&recipe, &inventory)
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["pork", "onion"]);
    }
}
