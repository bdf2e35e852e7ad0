use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::gesture::{DirectionMode, Predicate};

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub players: PlayersConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GestureConfig {
    /// 足の高さ差の閾値（ミリメートル）
    #[serde(default = "default_level_threshold")]
    pub level_threshold: f32,
    /// 方向フラグの保持方式
    #[serde(default)]
    pub direction_mode: DirectionMode,
    /// 有効化する追加判定
    #[serde(default)]
    pub predicates: Vec<Predicate>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlayersConfig {
    /// 同時に判定するボディ数
    #[serde(default = "default_max_players")]
    pub max_players: usize,
}

fn default_level_threshold() -> f32 { 0.0 }
fn default_max_players() -> usize { 2 }

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            level_threshold: default_level_threshold(),
            direction_mode: DirectionMode::default(),
            predicates: Vec::new(),
        }
    }
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            max_players: default_max_players(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// 読み込みに失敗したらデフォルト設定で続行
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{:#}; using default config", e);
                Self::default()
            }
        }
    }
}
