use crate::model::Ingredient;
use strum::{AsRefStr, Display};

/// Coarse ingredient family used for diversity scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum IngredientFamily {
    Vegetables,
    Proteins,
    Grains,
    Seasonings,
}

const FAMILY_KEYWORDS: &[(IngredientFamily, &[&str])] = &[
    (
        IngredientFamily::Vegetables,
        &[
            "にんじん",
            "玉ねぎ",
            "トマト",
            "大根",
            "キャベツ",
            "白菜",
            "ブロッコリー",
            "ピーマン",
            "ほうれん草",
        ],
    ),
    (
        IngredientFamily::Proteins,
        &["鶏肉", "豚肉", "牛肉", "卵", "豆腐", "納豆", "魚"],
    ),
    (IngredientFamily::Grains, &["米", "パスタ", "パン", "麺"]),
    (
        IngredientFamily::Seasonings,
        &["塩", "醤油", "みりん", "砂糖", "味噌", "バター"],
    ),
];

/// DiversityScorer rates how varied a set of ingredients is
///
/// Over every unordered pair, counts pairs sharing a known family:
/// `diversity = 1 - same_family_pairs / total_pairs`.
/// Names matching no keyword still count towards `total_pairs`.
pub struct DiversityScorer;

impl DiversityScorer {
    /// First family whose keyword appears in `name`
    pub fn classify(name: &str) -> Option<IngredientFamily> {
        let name = name.to_lowercase();
        FAMILY_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
            .map(|(family, _)| *family)
    }

    pub fn score(ingredients: &[Ingredient]) -> f64 {
        let names: Vec<&str> = ingredients.iter().map(|i| i.name.as_str()).collect();
        Self::score_names(&names)
    }

    /// Returns 0.0 for fewer than two names, otherwise a value in [0, 1]
    pub fn score_names(names: &[&str]) -> f64 {
        if names.len() <= 1 {
            return 0.0;
        }

        let families: Vec<Option<IngredientFamily>> =
            names.iter().map(|n| Self::classify(n)).collect();

        let mut same_family = 0usize;
        let mut total_pairs = 0usize;

        for (i, left) in families.iter().enumerate() {
            for right in &families[i + 1..] {
                total_pairs += 1;
                if left.is_some() && left == right {
                    same_family += 1;
                }
            }
        }

        1.0 - same_family as f64 / total_pairs as f64
    }
}
