use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::highlight::HighlightBackground;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    /// Forced background for this mode; `Auto` defers to detection.
    pub const fn background(self) -> Option<HighlightBackground> {
        match self {
            Self::Auto => None,
            Self::Light => Some(HighlightBackground::Light),
            Self::Dark => Some(HighlightBackground::Dark),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Defaults persisted between runs. The start slide is never persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub fullscreen: bool,
    pub no_transitions: bool,
    pub transition_ms: Option<u64>,
    pub theme: Option<ThemeMode>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches accumulate, valued options from
    /// `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            fullscreen: self.fullscreen || other.fullscreen,
            no_transitions: self.no_transitions || other.no_transitions,
            transition_ms: other.transition_ms.or(self.transition_ms),
            theme: other.theme.or(self.theme),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Effective transition length; zero when transitions are off.
    pub fn effective_transition_ms(&self) -> u64 {
        if self.no_transitions {
            0
        } else {
            self.transition_ms.unwrap_or(crate::deck::DEFAULT_TRANSITION_MS)
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("lectern").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("lectern")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("lectern").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("lectern")
                .join("config");
        }
    }

    PathBuf::from(".lecternrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".lecternrc")
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
    let mut lines = vec!["# lectern defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.fullscreen {
        lines.push("--fullscreen".to_string());
    }
    if flags.no_transitions {
        lines.push("--no-transitions".to_string());
    }
    if let Some(ms) = flags.transition_ms {
        lines.push(format!("--transition-ms {ms}"));
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.as_str()));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
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

/// Pick known flags out of a token list. Unknown tokens and malformed values
/// are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--watch" => flags.watch = true,
            "--fullscreen" => flags.fullscreen = true,
            "--no-transitions" => flags.no_transitions = true,
            "--transition-ms" | "--theme" | "--log-file" => {
                if let Some(next) = tokens.get(i + 1) {
                    apply_value(&mut flags, token, next);
                    i += 1;
                }
            }
            _ => {
                if let Some((name, value)) = token.split_once('=') {
                    apply_value(&mut flags, name, value);
                }
            }
        }
        i += 1;
    }
    flags
}

fn apply_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--transition-ms" => match value.parse() {
            Ok(ms) => flags.transition_ms = Some(ms),
            Err(_) => tracing::warn!(value, "config.bad_transition_ms"),
        },
        "--theme" => flags.theme = parse_theme(value),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "lectern",
            "--watch",
            "--fullscreen",
            "--theme",
            "dark",
            "--transition-ms=250",
            "--log-file",
            "lectern.log",
            "talk.md",
        ]));
        assert!(flags.watch);
        assert!(flags.fullscreen);
        assert!(!flags.no_transitions);
        assert_eq!(flags.theme, Some(ThemeMode::Dark));
        assert_eq!(flags.transition_ms, Some(250));
        assert_eq!(flags.log_file, Some(PathBuf::from("lectern.log")));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_slide_and_bad_values() {
        let flags = parse_flag_tokens(&tokens(&[
            "--slide",
            "3",
            "--transition-ms",
            "soon",
            "--theme=neon",
        ]));
        assert_eq!(flags, ConfigFlags::default());
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            watch: true,
            theme: Some(ThemeMode::Light),
            transition_ms: Some(600),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            fullscreen: true,
            theme: Some(ThemeMode::Dark),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.watch);
        assert!(merged.fullscreen);
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
        assert_eq!(merged.transition_ms, Some(600));
    }

    #[test]
    fn test_effective_transition_ms() {
        assert_eq!(
            ConfigFlags::default().effective_transition_ms(),
            crate::deck::DEFAULT_TRANSITION_MS
        );
        let custom = ConfigFlags {
            transition_ms: Some(120),
            ..ConfigFlags::default()
        };
        assert_eq!(custom.effective_transition_ms(), 120);
        let off = ConfigFlags {
            no_transitions: true,
            ..custom
        };
        assert_eq!(off.effective_transition_ms(), 0);
    }

    #[test]
    fn test_theme_mode_background() {
        assert_eq!(ThemeMode::Auto.background(), None);
        assert_eq!(
            ThemeMode::Light.background(),
            Some(HighlightBackground::Light)
        );
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            watch: true,
            fullscreen: true,
            no_transitions: true,
            transition_ms: Some(300),
            theme: Some(ThemeMode::Dark),
            log_file: Some(PathBuf::from("lectern.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }
}
