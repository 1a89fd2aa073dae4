use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::{Entity, EntityId, NumericField};

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
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    #[default]
    Lunch,
    Dinner,
    Snack,
}

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
pub enum DietaryTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    Keto,
    Paleo,
    HighProtein,
    LowCarb,
}

/// Recipe row of the admin recipe grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub meal_types: Vec<MealType>,
    #[serde(default)]
    pub dietary_tags: Vec<DietaryTag>,
    #[serde(default)]
    pub ingredient_count: Option<f64>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein_grams: Option<f64>,
    #[serde(default)]
    pub prep_time_minutes: Option<f64>,
    #[serde(default)]
    pub is_approved: bool,
}

impl Entity for Recipe {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn raw_metric(&self) -> Option<f64> {
        self.ingredient_count
    }

    fn is_approved(&self) -> bool {
        self.is_approved
    }

    fn set_approved(&mut self, approved: bool) {
        self.is_approved = approved;
    }

    fn meal_types(&self) -> &[MealType] {
        &self.meal_types
    }

    fn dietary_tags(&self) -> &[DietaryTag] {
        &self.dietary_tags
    }

    fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::ItemCount => self.ingredient_count,
            NumericField::Calories => self.calories,
            NumericField::Protein => self.protein_grams,
            NumericField::PrepTime => self.prep_time_minutes,
        }
    }
}
