use dnsprobe_domain::{CatalogEntry, SERVER_CATALOG};

/// Lists the built-in server catalog.
#[derive(Default)]
pub struct ListServersUseCase;

impl ListServersUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self) -> &'static [CatalogEntry] {
        SERVER_CATALOG
    }
}
