//! CrudService: record operations behind the generated routes.

mod crud;
pub mod filter;
mod validation;
pub use crud::CrudService;
pub use filter::{parse_filters, FieldFilter, Predicate};
pub use validation::RequestValidator;
