//! Tests for the logger module

use crate::logger::config::*;

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = LoggerConfig::default();
        assert!(config.colored);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_level_fails_validation() {
        let config = LoggerConfig::default().with_level("chatty");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_filter_directives_fail_validation() {
        let config = LoggerConfig::default().with_level("envtree=debug");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Known levels validate regardless of case
        #[test]
        fn property_valid_levels_validate(
            level in prop::sample::select(vec!["trace", "debug", "info", "warn", "error"]),
            upper in any::<bool>()
        ) {
            let level = if upper { level.to_uppercase() } else { level.to_string() };
            let config = LoggerConfig::default().with_level(level);
            prop_assert!(config.validate().is_ok());
        }

        /// Unknown levels are rejected
        #[test]
        fn property_invalid_levels_fail(level in "[a-z]{6,12}") {
            prop_assume!(!["trace", "debug", "info", "warn", "error"].contains(&level.as_str()));
            let config = LoggerConfig::default().with_level(level);
            prop_assert!(config.validate().is_err());
        }

        /// Format names round-trip through their string form
        #[test]
        fn property_format_names_parse(
            format in prop::sample::select(vec![LogFormat::Full, LogFormat::Compact, LogFormat::Json])
        ) {
            prop_assert_eq!(format.as_str().parse::<LogFormat>().unwrap(), format);
        }
    }
}
