//! Extractly core
//!
//! List view model and document pagination behind the Extractly content
//! extractor dashboard: searchable, paginated, editable tables with deferred
//! deletes, and deterministic layout of export documents onto pages.
//!
//! Pure core (`model`, `state`, `export` layout) with a thin impure shell
//! (`source`, `config`, `logging`, page writers, `app`).

pub mod app;
pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;

#[cfg(test)]
#[allow(dead_code)]
mod test_harness;

#[cfg(test)]
mod tests;
