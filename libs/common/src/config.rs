//! Process-wide runtime settings

/// Runtime mode the process was started in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
}

impl RuntimeMode {
    /// Read the runtime mode from the environment
    ///
    /// # Environment Variables
    /// - `NODE_ENV` or `APP_ENV`: "production" selects production mode,
    ///   anything else (or nothing) selects development
    pub fn from_env() -> Self {
        std::env::var("NODE_ENV")
            .or_else(|_| std::env::var("APP_ENV"))
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            RuntimeMode::Production
        } else {
            RuntimeMode::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, RuntimeMode::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeMode::Development => "development",
            RuntimeMode::Production => "production",
        }
    }
}
