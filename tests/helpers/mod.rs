//! Throwaway config and fixture files for command tests.

#![allow(dead_code)]

use std::path::PathBuf;

use mealplanner::{Config, Fixture};
use temp_dir::TempDir;

pub struct Workspace {
    // removed on drop
    pub dir: TempDir,
    pub fixture: PathBuf,
    pub config: Config,
}

impl Workspace {
    pub fn fixture(&self) -> anyhow::Result<Fixture> {
        Ok(Fixture::load(&self.fixture)?)
    }
}

/// Copy the sample fixture into a temp dir and load a config pointing at it.
///
/// `extra` is appended to the generated TOML, so it may add keys to the
/// `[grocery]` table or open new tables.
pub fn workspace(page_size: usize, extra: &str) -> anyhow::Result<Workspace> {
    let dir = TempDir::new()?;
    let fixture = dir.child("fixture.json");
    std::fs::copy("data/fixture.json", &fixture)?;

    let config_path = dir.child("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[listing]\npage_size = {page_size}\n\n\
             [bulk]\nsession_redirect_delay_ms = 0\n\n\
             [data]\nfixture = {:?}\n\n{extra}\n",
            fixture.to_string_lossy()
        ),
    )?;

    let config = Config::load(Some(config_path.to_string_lossy().into_owned()))?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    Ok(Workspace {
        dir,
        fixture,
        config,
    })
}
