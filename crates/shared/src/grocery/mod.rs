use serde::{Deserialize, Serialize};

use crate::{Entity, EntityId};

/// Grocery list shown in the list switcher. Grocery lists have no approval
/// workflow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryList {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub item_count: Option<f64>,
    #[serde(default)]
    pub is_default: bool,
}

impl GroceryList {
    pub fn is_populated(&self) -> bool {
        self.metric() > 0.0
    }
}

impl Entity for GroceryList {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn raw_metric(&self) -> Option<f64> {
        self.item_count
    }
}
