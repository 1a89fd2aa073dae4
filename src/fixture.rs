use std::path::{Path, PathBuf};

use mealplanner_shared::{GroceryList, Recipe};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Collections backing the in-memory collaborator, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub grocery_lists: Vec<GroceryList>,
}

impl Fixture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| AppError::FixtureIo {
            path: path.display().to_string(),
            source,
        })?;

        let fixture: Fixture = serde_json::from_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            recipes = fixture.recipes.len(),
            grocery_lists = fixture.grocery_lists.len(),
            "fixture loaded"
        );

        Ok(fixture)
    }

    /// Write the fixture back, replacing the file atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        let path = path.as_ref();
        let raw = serde_json::to_string_pretty(self)?;

        let mut tmp = PathBuf::from(path);
        tmp.set_extension("json.tmp");

        let io_err = |source| AppError::FixtureIo {
            path: path.display().to_string(),
            source,
        };
        std::fs::write(&tmp, raw).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)?;

        Ok(())
    }
}
