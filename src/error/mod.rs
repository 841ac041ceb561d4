//! Error types and handling for assetgraph
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructor helpers live in sub-modules by error domain:
//! - [`descriptor`]: Descriptor lookup and naming errors
//! - [`project`]: Project root and extraction root errors
//! - [`config`]: Configuration errors
//! - [`deps`]: Dependency errors

pub mod config;
pub mod deps;
pub mod descriptor;
pub mod project;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for assetgraph operations
#[derive(Error, Diagnostic, Debug)]
pub enum AssetGraphError {
    // Descriptor errors
    #[error("Asset descriptor '{name}' not found")]
    #[diagnostic(
        code(assetgraph::descriptor::not_found),
        help("Run 'assetgraph list' to see the descriptors found in this project")
    )]
    DescriptorNotFound { name: String },

    #[error("Duplicate asset descriptor '{name}': {first} and {second}")]
    #[diagnostic(
        code(assetgraph::descriptor::duplicate),
        help("Rename one of the classes, or set 'duplicates: shadow' in assetgraph.yaml")
    )]
    DuplicateDescriptor {
        name: String,
        first: String,
        second: String,
    },

    // Project errors
    #[error("Project root not found: {path}")]
    #[diagnostic(
        code(assetgraph::project::not_found),
        help("Pass the application directory with --project")
    )]
    ProjectRootNotFound { path: String },

    #[error("Asset root not found: {path}")]
    #[diagnostic(code(assetgraph::project::root_not_found))]
    RootNotFound { path: String },

    // Dependency errors
    #[error("Circular dependency detected: {chain}")]
    #[diagnostic(
        code(assetgraph::deps::circular),
        help("Remove one of the entries from the $depends lists along the chain")
    )]
    CircularDependency { chain: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(assetgraph::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(assetgraph::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(assetgraph::config::invalid))]
    ConfigInvalid { message: String },

    // Command errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(assetgraph::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(assetgraph::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for AssetGraphError {
    fn from(err: std::io::Error) -> Self {
        AssetGraphError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AssetGraphError {
    fn from(err: serde_yaml::Error) -> Self {
        AssetGraphError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AssetGraphError {
    fn from(err: serde_json::Error) -> Self {
        AssetGraphError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AssetGraphError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_error_display() {
        let err = descriptor::not_found("AppAsset");
        assert_eq!(err.to_string(), "Asset descriptor 'AppAsset' not found");
    }

    #[test]
    fn test_error_code() {
        let err = descriptor::not_found("AppAsset");
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("assetgraph::descriptor::not_found".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AssetGraphError = io_err.into();
        assert!(matches!(err, AssetGraphError::IoError { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: AssetGraphError = parse_result.unwrap_err().into();
        assert!(matches!(err, AssetGraphError::ConfigParseFailed { .. }));
    }

    test_error_contains!(
        test_duplicate_descriptor,
        descriptor::duplicate("AppAsset", "assets/AppAsset.php", "modules/a/AppAsset.php"),
        "AppAsset",
        "assets/AppAsset.php",
        "modules/a/AppAsset.php"
    );

    test_error_contains!(
        test_project_root_not_found,
        project::root_missing("/no/such/app"),
        "Project root not found",
        "/no/such/app"
    );

    test_error_contains!(
        test_asset_root_not_found,
        project::asset_root_missing("/app/extra"),
        "Asset root not found"
    );

    test_error_contains!(
        test_circular_dependency,
        deps::circular("A -> B -> A"),
        "Circular dependency",
        "A -> B -> A"
    );

    test_error_contains!(
        test_config_parse_failed,
        config::parse_failed("assetgraph.yaml", "unknown field"),
        "Failed to parse configuration file",
        "unknown field"
    );

    test_error_contains!(
        test_unsupported_shell,
        AssetGraphError::UnsupportedShell {
            shell: "tcsh".to_string()
        },
        "Unknown shell",
        "tcsh"
    );

    test_error_contains!(
        test_config_read_failed,
        config::read_failed("assetgraph.yaml", "permission denied"),
        "Failed to read configuration file"
    );

    test_error_contains!(
        test_config_invalid,
        config::invalid("suffixes must not be empty"),
        "Invalid configuration"
    );
}
