use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::{DietaryTag, MealType};

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    ItemCount,
    Calories,
    Protein,
    PrepTime,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Metric descending, then name ascending.
    #[default]
    ItemCount,
    /// Name ascending, then metric descending.
    Name,
}

/// Inclusive bounds; an unset side is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Search term, structured filters and sort key of one list view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub meal_type: Option<MealType>,
    #[serde(default)]
    pub dietary_tag: Option<DietaryTag>,
    #[serde(default)]
    pub ranges: Vec<(NumericField, NumericRange)>,
    #[serde(default)]
    pub sort_by: SortBy,
}

impl FilterState {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..Default::default()
        }
    }

    pub fn with_meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = Some(meal_type);
        self
    }

    pub fn with_dietary_tag(mut self, tag: DietaryTag) -> Self {
        self.dietary_tag = Some(tag);
        self
    }

    pub fn with_range(mut self, field: NumericField, range: NumericRange) -> Self {
        self.ranges.retain(|(f, _)| *f != field);
        self.ranges.push((field, range));
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Trimmed, lowercased search term, `None` when it matches everything.
    pub fn normalized_search(&self) -> Option<String> {
        let term = self.search.trim();
        if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        }
    }
}
