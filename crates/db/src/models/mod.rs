//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where the entity has one
//!
//! Status columns are TEXT in the database and decode into the
//! `studio_core::status` enums through `TryFrom<String>`.

pub mod contract;
pub mod invoice;
pub mod lifecycle;
pub mod payment;
pub mod profile;
pub mod project;
pub mod proposal;
pub mod task;
