//! Descriptor errors

use super::AssetGraphError;

/// Creates a descriptor not found error
pub fn not_found(name: impl Into<String>) -> AssetGraphError {
    AssetGraphError::DescriptorNotFound { name: name.into() }
}

/// Creates a duplicate descriptor error
pub fn duplicate(
    name: impl Into<String>,
    first: impl Into<String>,
    second: impl Into<String>,
) -> AssetGraphError {
    AssetGraphError::DuplicateDescriptor {
        name: name.into(),
        first: first.into(),
        second: second.into(),
    }
}
