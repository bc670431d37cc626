use std::fmt;
use std::str::FromStr;

/// Deployment environment; selects the prediction service base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Error returned when parsing an unrecognised environment name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEnvironment(pub String);

impl fmt::Display for UnknownEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown environment '{}' (expected development or production)",
            self.0
        )
    }
}

impl std::error::Error for UnknownEnvironment {}

impl Environment {
    pub fn name(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Base URL used when none is configured explicitly.
    ///
    /// Production has no default; its address must come from configuration.
    pub fn default_api_base_url(&self) -> Option<&'static str> {
        match self {
            Environment::Development => Some("http://localhost:5000"),
            Environment::Production => None,
        }
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment_names() {
        assert_eq!("dev".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("Production".parse::<Environment>(), Ok(Environment::Production));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_only_development_has_default_url() {
        assert_eq!(
            Environment::Development.default_api_base_url(),
            Some("http://localhost:5000")
        );
        assert_eq!(Environment::Production.default_api_base_url(), None);
    }
}
