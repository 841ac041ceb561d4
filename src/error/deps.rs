//! Dependency errors

use super::AssetGraphError;

/// Creates a circular dependency error
pub fn circular(chain: impl Into<String>) -> AssetGraphError {
    AssetGraphError::CircularDependency {
        chain: chain.into(),
    }
}
