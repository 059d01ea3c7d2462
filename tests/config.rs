//! Config files on disk.

use lexrule::config::{ConfigError, InterviewConfig};
use lexrule::engine::Engine;
use lexrule::question::QuestionBook;
use lexrule::rules::RuleBook;

#[test]
fn config_survives_save_and_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("lexrule.toml");

    let config = InterviewConfig {
        max_unknowns: 25,
        max_answer_attempts: 5,
        ..Default::default()
    };
    config.save(&path).unwrap();

    let loaded = InterviewConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let engine = Engine::new(loaded, RuleBook::new(), QuestionBook::new()).unwrap();
    assert_eq!(engine.new_session().unknowns().capacity(), 25);
}

#[test]
fn partial_file_uses_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("lexrule.toml");
    std::fs::write(&path, "max_unknowns = 10\n").unwrap();

    let loaded = InterviewConfig::load(&path).unwrap();
    assert_eq!(loaded.max_unknowns, 10);
    assert_eq!(loaded.max_answer_attempts, 3);
}

#[test]
fn load_errors_are_diagnosed() {
    let dir = tempfile::TempDir::new().unwrap();

    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        InterviewConfig::load(&missing),
        Err(ConfigError::ConfigRead { .. })
    ));

    let garbled = dir.path().join("garbled.toml");
    std::fs::write(&garbled, "max_unknowns = [").unwrap();
    assert!(matches!(
        InterviewConfig::load(&garbled),
        Err(ConfigError::ConfigParse { .. })
    ));

    let zero = dir.path().join("zero.toml");
    std::fs::write(&zero, "max_answer_attempts = 0").unwrap();
    assert!(matches!(
        InterviewConfig::load(&zero),
        Err(ConfigError::Invalid { .. })
    ));

    let wide = dir.path().join("wide.toml");
    std::fs::write(&wide, "partition_half_span_years = 2147483648").unwrap();
    assert!(matches!(
        InterviewConfig::load(&wide),
        Err(ConfigError::Invalid { .. })
    ));
}
