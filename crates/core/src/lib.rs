//! `costbook-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no store or IO concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BatchId, BillId, ProductId, SupplierId, TenantId};
pub use value_object::ValueObject;
