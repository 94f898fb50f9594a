use std::fmt;

/// A config setting that validation can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Views,
    Generated,
    Debounce,
}

impl ConfigField {
    /// Dotted key in `viewwatch.toml`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Views => "build.views",
            Self::Generated => "build.generated",
            Self::Debounce => "watch.debounce_ms",
        }
    }

    /// Command-line flag overriding the setting, if there is one.
    pub const fn flag(self) -> Option<&'static str> {
        match self {
            Self::Debounce => Some("--debounce-ms"),
            Self::Views | Self::Generated => None,
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())?;
        if let Some(flag) = self.flag() {
            write!(f, " ({flag})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_flag_override() {
        assert_eq!(ConfigField::Views.to_string(), "build.views");
        assert_eq!(ConfigField::Debounce.to_string(), "watch.debounce_ms (--debounce-ms)");
    }
}
