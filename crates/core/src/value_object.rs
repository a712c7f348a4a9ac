//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. Derived
/// results such as a valuation line or a set of aging buckets are value
/// objects: they carry no identity of their own and are recomputed on demand.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
