//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42

        [termination]
        seconds_spent_limit = 30
        conflict_count_limit = 500

        [enumeration]
        occurrence_limit = 100

        [enumeration.selection]
        type = "random"
        count = 3
        from = 50
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, Some(42));

    let termination = config.termination.clone().unwrap();
    assert_eq!(termination.seconds_spent_limit, Some(30));
    assert_eq!(termination.conflict_count_limit, Some(500));

    let enumeration = config.enumeration.clone().unwrap();
    assert_eq!(
        enumeration.selection,
        SelectionConfig::Random { count: 3, from: 50 }
    );
    assert_eq!(enumeration.occurrence_limit, Some(100));
    assert!(!enumeration.unbounded);
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 42
        termination:
          branch_count_limit: 10000
        enumeration:
          unbounded: true
          selection:
            type: first
            count: 5
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(
        config.termination.unwrap().branch_count_limit,
        Some(10000)
    );
    let enumeration = config.enumeration.unwrap();
    assert_eq!(enumeration.selection, SelectionConfig::First { count: 5 });
    assert!(enumeration.unbounded);
}

#[test]
fn test_empty_config_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
    assert_eq!(config.time_limit(), None);
}

#[test]
fn test_time_limit_sums_units() {
    let termination = TerminationConfig {
        minutes_spent_limit: Some(1),
        seconds_spent_limit: Some(2),
        millis_spent_limit: Some(500),
        ..Default::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(62_500)));
    assert!(!termination.is_unbounded());
    assert!(TerminationConfig::default().is_unbounded());
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_branch_count_limit(1_000)
        .with_selection(SelectionConfig::Ids { ids: vec![1, 4] });

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(
        config.termination.as_ref().unwrap().branch_count_limit,
        Some(1_000)
    );
    assert_eq!(
        config.enumeration.unwrap().selection,
        SelectionConfig::Ids { ids: vec![1, 4] }
    );
}

#[test]
fn test_validate_rejects_oversized_sample() {
    let config =
        SolverConfig::new().with_selection(SelectionConfig::Random { count: 10, from: 3 });
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_empty_ids() {
    let config = SolverConfig::new().with_selection(SelectionConfig::Ids { ids: vec![] });
    assert!(config.validate().is_err());
}

#[test]
fn test_unknown_selection_type_fails() {
    let toml = r#"
        [enumeration.selection]
        type = "every_other"
    "#;
    assert!(matches!(
        SolverConfig::from_toml_str(toml),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        SolverConfig::load("/nonexistent/satforge.toml"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_load_picks_format_by_extension() {
    let dir = std::env::temp_dir().join(format!("satforge-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let yaml = dir.join("search.yml");
    std::fs::write(&yaml, "termination:\n  conflict_count_limit: 9\n").unwrap();
    let config = SolverConfig::load(&yaml).unwrap();
    assert_eq!(config.termination.unwrap().conflict_count_limit, Some(9));

    let toml = dir.join("search.toml");
    std::fs::write(&toml, "random_seed = 3\n").unwrap();
    assert_eq!(SolverConfig::load(&toml).unwrap().random_seed, Some(3));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_with_selection_keeps_limit() {
    let mut config = SolverConfig::new().with_conflict_count_limit(4);
    config.enumeration = Some(EnumerationConfig {
        occurrence_limit: Some(7),
        ..Default::default()
    });
    let config = config.with_selection(SelectionConfig::First { count: 2 });

    let enumeration = config.enumeration.unwrap();
    assert_eq!(enumeration.occurrence_limit, Some(7));
    assert_eq!(enumeration.selection, SelectionConfig::First { count: 2 });
    assert_eq!(config.termination.unwrap().conflict_count_limit, Some(4));
}
