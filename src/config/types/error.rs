//! Config loading errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use super::ConfigField;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config is not valid TOML")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One rejected setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub field: ConfigField,
    pub message: String,
    pub hint: Option<&'static str>,
}

impl Problem {
    pub fn hint(&mut self, hint: &'static str) -> &mut Self {
        self.hint = Some(hint);
        self
    }
}

/// Problems found by one validation pass, reported together.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    problems: Vec<Problem>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem with `field`; chain [`Problem::hint`] to add a fix.
    pub fn reject(&mut self, field: ConfigField, message: impl Into<String>) -> &mut Problem {
        self.problems.push(Problem {
            field,
            message: message.into(),
            hint: None,
        });
        let last = self.problems.len() - 1;
        &mut self.problems[last]
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn into_result(self) -> Result<(), ConfigError> {
        if self.problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Diagnostics(self))
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "invalid view settings:".red().bold())?;
        for problem in &self.problems {
            write!(
                f,
                "\n  {} {}: {}",
                "✗".red(),
                problem.field.cyan(),
                problem.message
            )?;
            if let Some(hint) = problem.hint {
                write!(f, "\n    {} {hint}", "hint:".yellow())?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_read_error_names_file() {
        let err = ConfigError::Read {
            path: PathBuf::from("viewwatch.toml"),
            source: io::Error::new(ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("viewwatch.toml"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_problems_reported_together() {
        let mut diag = ConfigDiagnostics::new();
        assert!(diag.is_empty());
        diag.reject(ConfigField::Views, "absolute paths not allowed: /abs");
        diag.reject(ConfigField::Debounce, "must be greater than 0")
            .hint("default is 300");

        assert_eq!(diag.problems().len(), 2);
        assert_eq!(diag.problems()[0].hint, None);
        assert_eq!(diag.problems()[1].hint, Some("default is 300"));

        let Err(ConfigError::Diagnostics(diag)) = diag.into_result() else {
            panic!("expected diagnostics");
        };
        let text = diag.to_string();
        assert!(text.contains("absolute paths not allowed: /abs"));
        assert!(text.contains("--debounce-ms"));
        assert!(text.contains("default is 300"));
    }

    #[test]
    fn test_no_problems_is_ok() {
        assert!(ConfigDiagnostics::new().into_result().is_ok());
    }
}
