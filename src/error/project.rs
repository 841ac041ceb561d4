//! Project and extraction root errors

use super::AssetGraphError;

/// Creates a project root not found error
pub fn root_missing(path: impl Into<String>) -> AssetGraphError {
    AssetGraphError::ProjectRootNotFound { path: path.into() }
}

/// Creates an asset root not found error
pub fn asset_root_missing(path: impl Into<String>) -> AssetGraphError {
    AssetGraphError::RootNotFound { path: path.into() }
}
