//! Merge CLI flags over file settings

use crate::domain::{Config, LineBase};

/// Settings given on the command line. `None` keeps the file or default value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub lookahead: Option<usize>,
    pub default_encoding: Option<String>,
    pub line_base: Option<LineBase>,
}

pub fn merge_cli_with_config(mut config: Config, overrides: CliOverrides) -> Config {
    if let Some(lookahead) = overrides.lookahead {
        config.lookahead = lookahead;
    }
    if let Some(encoding) = overrides.default_encoding.filter(|e| !e.trim().is_empty()) {
        config.default_encoding = encoding;
    }
    if let Some(line_base) = overrides.line_base {
        config.line_base = line_base;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = Config { lookahead: 7, ..Config::default() };
        let merged = merge_cli_with_config(config.clone(), CliOverrides::default());
        assert_eq!(merged, config);
    }

    #[test]
    fn test_cli_wins_over_file() {
        let config = Config {
            lookahead: 7,
            default_encoding: "latin1".to_string(),
            line_base: LineBase::Zero,
        };
        let merged = merge_cli_with_config(
            config,
            CliOverrides {
                lookahead: Some(2),
                default_encoding: Some("auto".to_string()),
                line_base: Some(LineBase::One),
            },
        );
        assert_eq!(merged.lookahead, 2);
        assert_eq!(merged.default_encoding, "auto");
        assert_eq!(merged.line_base, LineBase::One);
    }

    #[test]
    fn test_blank_encoding_override_is_ignored() {
        let merged = merge_cli_with_config(
            Config::default(),
            CliOverrides { default_encoding: Some("  ".to_string()), ..CliOverrides::default() },
        );
        assert_eq!(merged.default_encoding, "utf-8");
    }
}
