//! Modules bundled with the `cascade` binary.

mod collector;
mod containers;
mod line_counter;
mod summary;

use cascade_core::error::CatalogError;
use cascade_core::impls::ModuleCatalog;

pub use collector::FileCollector;
pub use line_counter::LineCounter;
pub use summary::Summary;

pub fn catalog() -> Result<ModuleCatalog, CatalogError> {
    let mut catalog = ModuleCatalog::new();
    catalog.register_fn(FileCollector::NAME, |state| Box::new(FileCollector::new(state)))?;
    catalog.register_fn(LineCounter::NAME, |state| Box::new(LineCounter::new(state)))?;
    catalog.register_fn(Summary::NAME, |state| Box::new(Summary::new(state)))?;
    Ok(catalog)
}
