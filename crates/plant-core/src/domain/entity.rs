//! Domain Layer - Core Entity Trait

/// Anything stored in a keyed collection
pub trait Entity: Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Treat empty or whitespace-only optional text as absent.
///
/// Legacy data files store "no value" as `""`.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
