//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ViewRouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is empty", .path.display())]
    Empty { path: PathBuf },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ViewRouterConfig, ConfigError> {
    let config: ViewRouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ViewRouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;
    use crate::routing::TableVariant;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.router.variant, TableVariant::Full);
        assert!(config.router.case_sensitive);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_parse_routes() {
        let config = parse_config(
            r#"
            [router]
            case_sensitive = false

            [observability]
            log_format = "json"

            [[routes]]
            path = "/"
            name = "home"
            view = "HomeView"

            [[routes]]
            path = "/:pathMatch(.*)*"
            name = "NotFound"
            view = "NotFound"
            "#,
        )
        .unwrap();

        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert!(!config.router_options().case_sensitive);

        let resolver = config.build_resolver().unwrap();
        assert_eq!(resolver.resolve("/").name, "home");
        assert_eq!(resolver.resolve("/x").name, "NotFound");
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[router]\nvariant = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_config(
            r#"
            [[routes]]
            path = "/"
            name = "home"
            view = "HomeView"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation failed: route table has no terminal catch-all entry"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
