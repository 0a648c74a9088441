mod edit;
mod list;
mod play;

pub use list::PlanRow;
pub use play::SessionSetup;

use anyhow::{Context, Result};
use zikr_core::library::{self, Library};
use zikr_core::store::KeyValueStore;

pub struct App<'a> {
    pub store: &'a dyn KeyValueStore,
}

impl<'a> App<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn library(&self) -> Result<Library> {
        library::load_library(self.store).context("failed to load the practice plan library")
    }
}
