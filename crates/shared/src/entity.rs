use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DietaryTag, MealType, NumericField};

/// Opaque identifier of a listed record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A record shown in a list view: a recipe in the admin grid or a grocery
/// list in the list switcher.
///
/// Only `id`, `name`, `metric` and `is_approved` are required; the structured
/// filter accessors default to "no value" so entities without meal types or
/// nutrition data simply never match those filters.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> &EntityId;

    fn name(&self) -> &str;

    /// Raw sort metric as delivered by the remote source. May be missing.
    fn raw_metric(&self) -> Option<f64>;

    fn is_approved(&self) -> bool {
        false
    }

    fn set_approved(&mut self, _approved: bool) {}

    fn meal_types(&self) -> &[MealType] {
        &[]
    }

    fn dietary_tags(&self) -> &[DietaryTag] {
        &[]
    }

    fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::ItemCount => self.raw_metric(),
            _ => None,
        }
    }

    /// Sort metric with missing or malformed values read as zero.
    fn metric(&self) -> f64 {
        sanitize(self.raw_metric())
    }
}

/// Missing, NaN and infinite values all read as zero.
pub fn sanitize(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
