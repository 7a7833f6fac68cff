//! Public data model of the envdeck dashboard views.
//!
//! Records mirror what the backend delivers for each dashboard page.
//! [`QueryState`] and [`ListPage`] describe the input and output of the list-view pipeline in `envdeck-core`.

mod domain;
pub use domain::*;

mod error;
pub use error::ModelError;
