use crate::error::BotError;
use ini::Ini;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let candidates = config_file_candidates();
        for path in &candidates {
            if path.exists() {
                return Self::load_from_path(path);
            }
        }
        let searched: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        Err(BotError::ConfigInvalid(format!("No config.ini found (searched {})", searched.join(", "))).into())
    }

    pub fn load_from_path(config_path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            BotError::ConfigInvalid(format!(
                "Cannot read config at {}: {}",
                config_path.display(),
                e
            ))
        })?;
        let ini = Ini::load_from_str(&contents).map_err(|e| {
            BotError::ConfigInvalid(format!("Invalid INI in {}: {}", config_path.display(), e))
        })?;
        let token = ini
            .section(Some("Global"))
            .and_then(|section| section.get("token"))
            .ok_or_else(|| {
                BotError::ConfigInvalid(format!(
                    "Missing 'token' under section [Global] in {}",
                    config_path.display()
                ))
            })?;
        let config = Self {
            token: token.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.token.is_empty() {
            anyhow::bail!("token must not be empty");
        }
        Ok(())
    }
}

/// Search order: XDG-style user config first, then the working directory.
fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".config").join("haddock-bot").join("config.ini"));
    }
    candidates.push(PathBuf::from("config.ini"));
    candidates
}
