//! Configuration errors

use super::AssetGraphError;

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> AssetGraphError {
    AssetGraphError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> AssetGraphError {
    AssetGraphError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> AssetGraphError {
    AssetGraphError::ConfigInvalid {
        message: message.into(),
    }
}
