//! # Rental Properties
//!
//! Domain types, validation and storage for property records. Nothing in
//! this module knows about HTTP.

pub mod errors;
pub mod model;
pub mod store;
pub mod validation;

pub use errors::{StoreError, StoreResult, ValidationError};
pub use model::{
    ListFilter, NewProperty, Property, PropertyId, PropertyList, PropertyStatus, PropertyUpdate,
};
pub use store::{InMemoryPropertyStore, PropertyStore};
pub use validation::{validate_create, validate_id, validate_query, validate_update, ValidationResult};
