use thiserror::Error;

use crate::config::{EtlSettings, ServerSettings, Settings, SqlLabSettings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_sqllab(&settings.sqllab) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_etl(&settings.etl) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_sqllab(sqllab: &SqlLabSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if sqllab.webserver_timeout == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "sqllab.webserver_timeout".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_etl(etl: &EtlSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if etl.column_name_pattern.is_empty() {
            errors.push(ValidationError::MissingField(
                "etl.column_name_pattern".to_string(),
            ));
        } else if let Err(e) = regex::Regex::new(&etl.column_name_pattern) {
            errors.push(ValidationError::InvalidValue {
                field: "etl.column_name_pattern".to_string(),
                reason: e.to_string(),
            });
        }

        if etl.max_chunk_size == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "etl.max_chunk_size".to_string(),
                reason: "Chunk size limit must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiSettings;

    fn settings() -> Settings {
        Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            sqllab: SqlLabSettings::default(),
            etl: EtlSettings::default(),
            ui: UiSettings::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(ConfigValidator::validate(&settings()).is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut settings = settings();
        settings.server.port = 0;

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_empty_host() {
        let mut settings = settings();
        settings.server.host = String::new();

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert!(matches!(&errors[0], ValidationError::MissingField(f) if f == "server.host"));
    }

    #[test]
    fn test_zero_timeout() {
        let mut settings = settings();
        settings.sqllab.webserver_timeout = 0;

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert!(matches!(
            &errors[0],
            ValidationError::InvalidValue { field, .. } if field == "sqllab.webserver_timeout"
        ));
    }

    #[test]
    fn test_invalid_column_pattern() {
        let mut settings = settings();
        settings.etl.column_name_pattern = "([a-z".to_string();

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("Invalid value for etl.column_name_pattern"));
    }

    #[test]
    fn test_errors_are_collected() {
        let mut settings = settings();
        settings.server.port = 0;
        settings.etl.max_chunk_size = 0;
        settings.etl.column_name_pattern = String::new();

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
