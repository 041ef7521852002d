use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use haunted_core::{CellCount, GameConfig};

/// Reads a TOML board description. Missing keys fall back to the classic board.
pub fn load(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::classic());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    let config: GameConfig = toml::from_str(&text)
        .with_context(|| format!("Could not parse config file {}", path.display()))?;
    log::debug!("Loaded {:?} from {}", config, path.display());
    Ok(config)
}

pub fn apply_overrides(mut config: GameConfig, mines: Option<CellCount>) -> Result<GameConfig> {
    if let Some(mines) = mines {
        config.mines = mines;
    }
    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_classic_defaults() {
        let config: GameConfig = toml::from_str("mines = 40\nhazard_interval_ms = 500\n").unwrap();

        assert_eq!(config.size(), GameConfig::CLASSIC_SIZE);
        assert_eq!(config.mines, 40);
        assert_eq!(config.safe_radius, GameConfig::CLASSIC_SAFE_RADIUS);
        assert_eq!(config.hazard_interval_ms, 500);
    }

    #[test]
    fn bundled_classic_config_matches_builtin() {
        let config: GameConfig = toml::from_str(include_str!("../configs/classic.toml")).unwrap();

        assert_eq!(config, GameConfig::classic());
    }

    #[test]
    fn overrides_are_validated() {
        let config = GameConfig::new((3, 3), 1);

        assert!(apply_overrides(config, Some(9)).is_err());
        assert_eq!(
            apply_overrides(config.with_safe_radius(1), Some(8)).unwrap().mines,
            8
        );
    }
}
