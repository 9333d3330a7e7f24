use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::export::{ExportFormat, Theme};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn theme(self) -> Theme {
        match self {
            Self::Light => Theme::light(),
            Self::Dark => Theme::dark(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub format: Option<ExportFormat>,
    pub theme: Option<ThemeMode>,
    pub history_limit: Option<usize>,
    pub no_shell: bool,
}

impl ConfigFlags {
    /// Merge two flag sets; options set in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            format: other.format.or(self.format),
            theme: other.theme.or(self.theme),
            history_limit: other.history_limit.or(self.history_limit),
            no_shell: self.no_shell || other.no_shell,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("marknote").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("marknote")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("marknote").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("marknote")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".marknoterc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# marknote defaults (saved with --save)".to_string()];
    if let Some(format) = flags.format {
        lines.push(format!("--format {}", format.as_str()));
    }
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        lines.push(format!("--theme {theme_str}"));
    }
    if let Some(limit) = flags.history_limit {
        lines.push(format!("--history-limit {limit}"));
    }
    if flags.no_shell {
        lines.push("--no-shell".to_string());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list; anything else is ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-shell" {
            flags.no_shell = true;
        } else if token == "--format" {
            if let Some(next) = tokens.get(i + 1) {
                flags.format = parse_format(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--format=") {
            flags.format = parse_format(value);
        } else if token == "--theme" {
            if let Some(next) = tokens.get(i + 1) {
                flags.theme = parse_theme(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--theme=") {
            flags.theme = parse_theme(value);
        } else if token == "--history-limit" {
            if let Some(next) = tokens.get(i + 1) {
                flags.history_limit = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--history-limit=") {
            flags.history_limit = value.parse().ok();
        }
        i += 1;
    }
    flags
}

fn parse_format(s: &str) -> Option<ExportFormat> {
    match s {
        "html" => Some(ExportFormat::Html),
        "markdown" | "md" => Some(ExportFormat::Markdown),
        _ => None,
    }
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "marknote".to_string(),
            "export".to_string(),
            "--format".to_string(),
            "markdown".to_string(),
            "--theme".to_string(),
            "dark".to_string(),
            "--history-limit=20".to_string(),
            "--no-shell".to_string(),
            "note.json".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.format, Some(ExportFormat::Markdown));
        assert_eq!(flags.theme, Some(ThemeMode::Dark));
        assert_eq!(flags.history_limit, Some(20));
        assert!(flags.no_shell);
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let args = vec![
            "--format".to_string(),
            "pdf".to_string(),
            "--history-limit".to_string(),
            "lots".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags, ConfigFlags::default());
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            no_shell: true,
            theme: Some(ThemeMode::Light),
            history_limit: Some(10),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            format: Some(ExportFormat::Markdown),
            theme: Some(ThemeMode::Dark),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.no_shell);
        assert_eq!(merged.format, Some(ExportFormat::Markdown));
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
        assert_eq!(merged.history_limit, Some(10));
    }

    #[test]
    fn test_theme_mode_maps_to_tokens() {
        assert_eq!(ThemeMode::Dark.theme(), Theme::dark());
        assert_eq!(ThemeMode::Light.theme(), Theme::light());
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(".marknoterc");
        let flags = ConfigFlags {
            format: Some(ExportFormat::Html),
            theme: Some(ThemeMode::Dark),
            history_limit: Some(75),
            no_shell: true,
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }
}
