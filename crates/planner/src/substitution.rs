use crate::matcher::{contains_fragment, find_in_inventory};
use crate::model::{Ingredient, Recipe};
use std::collections::BTreeMap;

/// Known replacements, in order of preference
const SUBSTITUTIONS: &[(&str, &[&str])] = &[
    ("バター", &["マーガリン", "オリーブオイル"]),
    ("牛乳", &["豆乳", "無調整豆乳", "アーモンドミルク"]),
    ("小麦粉", &["米粉", "コーンスターチ"]),
    ("サラダ油", &["オリーブオイル", "ごま油", "キャノーラ油"]),
    ("砂糖", &["はちみつ", "メープルシロップ", "三温糖"]),
    ("白米", &["玄米", "雑穀米"]),
    ("じゃがいも", &["さつまいも", "里芋"]),
    ("鶏肉", &["豚肉", "豆腐"]),
    ("豚肉", &["鶏肉", "牛肉"]),
    ("牛肉", &["豚肉", "鶏肉"]),
    ("パン粉", &["クラッカー", "米粉"]),
];

/// SubstitutionAdvisor proposes on-hand replacements for missing recipe ingredients
pub struct SubstitutionAdvisor;

impl SubstitutionAdvisor {
    /// Substitute candidates for `name`, or an empty slice when none are known.
    /// Lookup is by exact name.
    pub fn candidates(name: &str) -> &'static [&'static str] {
        SUBSTITUTIONS
            .iter()
            .find(|(original, _)| *original == name)
            .map(|(_, candidates)| *candidates)
            .unwrap_or(&[])
    }

    /// Map of missing ingredient name to the first substitute found in inventory
    pub fn suggest(recipe: &Recipe, inventory: &[Ingredient]) -> BTreeMap<String, String> {
        let mut suggestions = BTreeMap::new();

        for line in &recipe.ingredients {
            if find_in_inventory(&line.name, inventory).is_some() {
                continue;
            }

            let available = Self::candidates(&line.name).iter().find(|candidate| {
                inventory
                    .iter()
                    .any(|ingredient| contains_fragment(&ingredient.name, candidate))
            });

            if let Some(substitute) = available {
                suggestions.insert(line.name.clone(), (*substitute).to_string());
            }
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeIngredient;

    fn recipe(lines: &[&str]) -> Recipe {
        Recipe::new(
            "r1",
            "test",
            lines
                .iter()
                .map(|n| RecipeIngredient::new(*n, 1.0, ""))
                .collect(),
        )
    }

    #[test]
    fn test_suggests_available_substitute() {
        let inventory = vec![Ingredient::new("oil", "オリーブオイル")];

        let suggestions = SubstitutionAdvisor::suggest(&recipe(&["バター"]), &inventory);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions["バター"], "オリーブオイル");
    }

    #[test]
    fn test_present_ingredients_need_no_substitute() {
        let inventory = vec![
            Ingredient::new("butter", "無塩バター"),
            Ingredient::new("margarine", "マーガリン"),
        ];

        assert!(SubstitutionAdvisor::suggest(&recipe(&["バター"]), &inventory).is_empty());
    }

    #[test]
    fn test_first_available_candidate_wins() {
        let inventory = vec![
            Ingredient::new("almond", "アーモンドミルク"),
            Ingredient::new("soy", "無調整豆乳"),
        ];

        let suggestions = SubstitutionAdvisor::suggest(&recipe(&["牛乳"]), &inventory);
        assert_eq!(suggestions["牛乳"], "豆乳");
    }

    #[test]
    fn test_unknown_and_unavailable_are_omitted() {
        let inventory = vec![Ingredient::new("tofu", "木綿豆腐")];

        let suggestions =
            SubstitutionAdvisor::suggest(&recipe(&["鶏肉", "わさび", "パン粉"]), &inventory);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions["鶏肉"], "豆腐");
    }

    #[test]
    fn test_candidates_lookup_is_exact() {
        assert_eq!(SubstitutionAdvisor::candidates("白米"), &["玄米", "雑穀米"]);
        assert!(SubstitutionAdvisor::candidates("白米ご飯").is_empty());
    }
}
