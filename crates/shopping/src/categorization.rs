use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Grocery section a shopping item is filed under
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Vegetables,
    Fruits,
    Meat,
    Seafood,
    Dairy,
    Grains,
    Seasonings,
    Other,
}

impl Category {
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Vegetables => &[
                "にんじん", "玉ねぎ", "トマト", "大根", "キャベツ", "白菜", "レタス", "きゅうり",
            ],
            Category::Fruits => &["りんご", "バナナ", "オレンジ", "いちご", "ぶどう", "レモン"],
            Category::Meat => &[
                "鶏肉", "豚肉", "牛肉", "ひき肉", "鶏むね肉", "鶏もも肉", "ベーコン", "ハム",
                "ソーセージ",
            ],
            Category::Seafood => &["魚", "サーモン", "マグロ", "エビ", "カニ", "イカ", "タコ"],
            Category::Dairy => &["牛乳", "チーズ", "ヨーグルト", "バター", "卵", "生クリーム"],
            Category::Grains => &["米", "パスタ", "パン", "麺", "小麦粉", "片栗粉", "パン粉"],
            Category::Seasonings => &[
                "塩",
                "砂糖",
                "醤油",
                "みりん",
                "酢",
                "味噌",
                "ケチャップ",
                "マヨネーズ",
                "オリーブオイル",
            ],
            Category::Other => &[],
        }
    }
}

/// Categorization Service
///
/// Stateless domain service that files ingredients under grocery sections by
/// keyword containment. Sections are checked in declaration order and the
/// first hit wins, so "鶏むね肉" is meat and "ハムチーズ" is meat too.
pub struct CategorizationService;

impl CategorizationService {
    pub fn categorize(ingredient_name: &str) -> Category {
        let normalized = ingredient_name.trim().to_lowercase();

        Category::VARIANTS
            .iter()
            .copied()
            .find(|category| {
                category
                    .keywords()
                    .iter()
                    .any(|keyword| normalized.contains(keyword))
            })
            .unwrap_or(Category::Other)
    }
}
