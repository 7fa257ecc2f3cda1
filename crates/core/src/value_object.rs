//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: they are defined entirely by their
/// attribute values and never change once built. A score breakdown or a set of
/// scoring weights is a value object; a location is an entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
