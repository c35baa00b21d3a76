use term_pong::config::*;
use term_pong::error::ConfigError;

#[test]
fn defaults_match_extended_game() {
    let c = GameConfig::default();
    assert!(c.enable_scoring);
    assert!(c.enable_levels);
    assert_eq!(c.opponent_policy, OpponentPolicy::DelayedTracking);
    assert_eq!(c.control_scheme, ControlScheme::Wasd);
    assert_eq!((c.width, c.height), (800.0, 400.0));
    assert_eq!(c.reaction_delay, 5);
    assert_eq!(c.level_thresholds, vec![5, 10, 15]);
    assert!(c.validate().is_ok());
}

#[test]
fn empty_toml_gives_defaults() {
    let c = GameConfig::from_toml_str("").unwrap();
    assert_eq!(c, GameConfig::default());
}

#[test]
fn toml_overrides_only_given_keys() {
    let c = GameConfig::from_toml_str(
        r#"
        enable_levels = false
        opponent_policy = "mirror"
        control_scheme = "arrows"
        ball_speed = 6.0
        "#,
    )
    .unwrap();
    assert!(!c.enable_levels);
    assert!(c.enable_scoring);
    assert_eq!(c.opponent_policy, OpponentPolicy::Mirror);
    assert_eq!(c.control_scheme, ControlScheme::Arrows);
    assert_eq!(c.ball_speed, 6.0);
    assert_eq!(c.paddle_height, 100.0);
}

#[test]
fn unknown_policy_is_a_parse_error() {
    let err = GameConfig::from_toml_str(r#"opponent_policy = "psychic""#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn paddle_taller_than_arena_is_rejected() {
    let err = GameConfig::from_toml_str("paddle_height = 400.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn non_positive_speed_is_rejected() {
    let c = GameConfig {
        ball_speed: 0.0,
        ..GameConfig::default()
    };
    assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn overlapping_mistake_bands_are_rejected() {
    let c = GameConfig {
        mistake_chance: 0.6,
        ..GameConfig::default()
    };
    assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn only_toml_files_load() {
    let err = GameConfig::load_from_file("pong.ron").unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = GameConfig::load_from_file("/definitely/not/here/pong.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
