use crate::model::Ingredient;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Urgency at or above which an ingredient counts as "expiring soon"
pub const EXPIRING_SOON_THRESHOLD: f64 = 5.0;

/// Urgency used when an ingredient has no expiry date
pub const BASELINE_URGENCY: f64 = 1.0;

const MAX_URGENCY: f64 = 10.0;
const HIGH_URGENCY: f64 = 7.0;
const DECAY_PER_DAY: f64 = 0.2;

/// Display tier derived from an urgency score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExpiryStatus {
    /// Urgency >= 7.0 (three days or less)
    Critical,
    /// Urgency >= 5.0 (within a week)
    Warning,
    Fresh,
}

impl ExpiryStatus {
    pub fn classify(urgency: f64) -> Self {
        if urgency >= HIGH_URGENCY {
            ExpiryStatus::Critical
        } else if urgency >= EXPIRING_SOON_THRESHOLD {
            ExpiryStatus::Warning
        } else {
            ExpiryStatus::Fresh
        }
    }
}

/// UrgencyScorer converts expiry dates into consumption priority
///
/// Step tiers with a linear tail:
/// - expired, today or tomorrow => 10.0
/// - 2-3 days => 7.0
/// - 4-7 days => 5.0
/// - beyond a week => 5.0 minus 0.2 per extra day, floored at 1.0
///
/// The tier boundaries are deliberate discontinuities.
pub struct UrgencyScorer;

impl UrgencyScorer {
    /// Whole days from `today` until the ingredient expires (negative once expired)
    ///
    /// Expiry dates are calendar days, so this equals rounding the remaining
    /// time up to whole days from any instant during `today`.
    pub fn days_until_expiry(ingredient: &Ingredient, today: NaiveDate) -> Option<i64> {
        ingredient
            .expiry_date
            .map(|expiry| expiry.signed_duration_since(today).num_days())
    }

    pub fn score(ingredient: &Ingredient, today: NaiveDate) -> f64 {
        match Self::days_until_expiry(ingredient, today) {
            None => BASELINE_URGENCY,
            Some(days) => Self::score_days(days),
        }
    }

    pub fn score_days(days: i64) -> f64 {
        match days {
            i64::MIN..=1 => MAX_URGENCY,
            2..=3 => HIGH_URGENCY,
            4..=7 => EXPIRING_SOON_THRESHOLD,
            _ => (EXPIRING_SOON_THRESHOLD - (days - 7) as f64 * DECAY_PER_DAY)
                .max(BASELINE_URGENCY),
        }
    }

    pub fn is_expiring_soon(ingredient: &Ingredient, today: NaiveDate) -> bool {
        Self::score(ingredient, today) >= EXPIRING_SOON_THRESHOLD
    }

    pub fn status(ingredient: &Ingredient, today: NaiveDate) -> ExpiryStatus {
        ExpiryStatus::classify(Self::score(ingredient, today))
    }
}

/// Ingredients expiring on or before `today + window_days`, soonest first.
///
/// Items without an expiry date are never included. Equal dates keep
/// inventory order. A window reaching past the calendar covers every dated
/// item.
pub fn expiring_within(
    inventory: &[Ingredient],
    today: NaiveDate,
    window_days: i64,
) -> Vec<&Ingredient> {
    let span = Days::new(window_days.unsigned_abs());
    let cutoff = if window_days >= 0 {
        today.checked_add_days(span).unwrap_or(NaiveDate::MAX)
    } else {
        today.checked_sub_days(span).unwrap_or(NaiveDate::MIN)
    };

    let mut expiring: Vec<&Ingredient> = inventory
        .iter()
        .filter(|i| i.expiry_date.is_some_and(|d| d <= cutoff))
        .collect();
    expiring.sort_by_key(|i| i.expiry_date);
    expiring
}

/// Inventory ordered by urgency, most urgent first; ties keep input order
pub fn sort_by_urgency<'a>(
    ingredients: &[&'a Ingredient],
    today: NaiveDate,
) -> Vec<&'a Ingredient> {
    let mut scored: Vec<(f64, &Ingredient)> = ingredients
        .iter()
        .map(|i| (UrgencyScorer::score(i, today), *i))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, i)| i).collect()
}
