use marknote::config::{ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens};
use marknote::export::ExportFormat;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".marknoterc");
    let content = r#"
# comment
--no-shell

--theme light

--history-limit=30
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_shell);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.history_limit, Some(30));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".marknoterc");
    let content = "--no-shell\n--theme light\n--format markdown\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "marknote".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--history-limit".to_string(),
        "5".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_shell, "file flags should remain enabled");
    assert_eq!(effective.history_limit, Some(5), "cli flags should be applied");
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
    assert_eq!(
        effective.format,
        Some(ExportFormat::Markdown),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "marknote".to_string(),
        "--theme=dark".to_string(),
        "--format=html".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.theme, Some(ThemeMode::Dark));
    assert_eq!(flags.format, Some(ExportFormat::Html));
}

#[test]
fn test_config_union_keeps_file_options_when_cli_is_empty() {
    let file = ConfigFlags {
        format: Some(ExportFormat::Markdown),
        history_limit: Some(12),
        ..ConfigFlags::default()
    };
    let merged = file.union(&ConfigFlags::default());
    assert_eq!(merged, file);
}
