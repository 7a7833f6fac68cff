//! List-view engine of the envdeck dashboard.
//!
//! Every dashboard page derives its visible rows with the same pure pipeline:
//! search, filter, stable sort, paginate. [`ListPipeline`] implements it once and [`presets`] configures it per page.

pub mod error;
pub use error::CoreError;

pub mod pipeline;
pub use pipeline::{ListPipeline, PageLabel, compare_instant, compare_text, contains_ignore_case, page_labels};

pub mod presets;
pub use presets::ViewKind;

pub mod view;
pub use view::ListView;

pub mod catalog;
pub use catalog::{Catalog, CatalogSnapshot, Collection};

pub mod secret;
pub use secret::{RevealSet, display_secret, mask_secret};
