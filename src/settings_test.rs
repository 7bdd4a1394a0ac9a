#[cfg(test)]
mod tests {
    use super::super::error::LogError;
    use super::super::parser::ParserConfig;
    use super::super::settings::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.last_hour, 73);
        assert_eq!(settings.header_rows, 3);
        assert_eq!(settings.platinum_per_peasant, 4);
        assert_eq!(settings.daily_land_bonus, 20);
        assert_eq!(settings.fallback_spell_multiplier, dec!(2));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let no_hours = Settings {
            last_hour: 0,
            ..Settings::default()
        };
        assert!(matches!(no_hours.validate(), Err(LogError::Settings(_))));

        let negative = Settings {
            fallback_spell_multiplier: dec!(-1),
            ..Settings::default()
        };
        assert!(matches!(negative.validate(), Err(LogError::Settings(_))));
    }

    #[test]
    fn test_load_partial_json() {
        let temp_file = std::env::temp_dir().join("od_tools_settings_test.json");
        std::fs::write(&temp_file, r#"{"last_hour": 10, "platinum_per_peasant": 5}"#).unwrap();

        let settings = Settings::load_from_file(&temp_file).unwrap();
        assert_eq!(settings.last_hour, 10);
        assert_eq!(settings.platinum_per_peasant, 5);
        assert_eq!(settings.header_rows, 3);

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_load_yaml() {
        let temp_file = std::env::temp_dir().join("od_tools_settings_test.yaml");
        std::fs::write(&temp_file, "daily_land_bonus: 25\nfallback_spell_multiplier: \"1.5\"\n").unwrap();

        let settings = Settings::load_from_file(&temp_file).unwrap();
        assert_eq!(settings.daily_land_bonus, 25);
        assert_eq!(settings.fallback_spell_multiplier, dec!(1.5));
        assert_eq!(settings.last_hour, 73);

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let temp_file = std::env::temp_dir().join("od_tools_settings_invalid.json");
        std::fs::write(&temp_file, r#"{"last_hour": 0}"#).unwrap();

        assert!(Settings::load_from_file(&temp_file).is_err());

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_parser_config_follows_settings() {
        let settings = Settings {
            last_hour: 12,
            ..Settings::default()
        };
        let config = ParserConfig::from_settings(&settings, true);
        assert!(config.debug);
        assert_eq!(config.last_hour, 12);
        assert_eq!(ParserConfig::default().last_hour, 73);
    }
}
