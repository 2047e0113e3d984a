//! 服务端配置

use std::path::Path;

use anyhow::{Context, Result};
use protocol::Difficulty;
use serde::{Deserialize, Serialize};

/// 配置文件路径的环境变量
pub const CONFIG_ENV: &str = "GAME_SERVER_CONFIG";

/// 服务端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 日志过滤指令
    pub log_filter: String,
    /// AI 座位默认难度
    pub default_difficulty: Difficulty,
    /// 随机种子，None 时使用系统熵
    pub rng_seed: Option<u64>,
    /// 每个对局的走法队列长度
    pub session_queue_depth: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_filter: "game_server=debug".to_string(),
            default_difficulty: Difficulty::default(),
            rng_seed: None,
            session_queue_depth: 32,
        }
    }
}

impl ServerConfig {
    /// 从环境变量指定的文件加载，未设置时使用默认配置
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("配置文件格式无效: {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ServerConfig::from_json(r#"{"rng_seed":5,"default_difficulty":"hard"}"#).unwrap();
        assert_eq!(config.rng_seed, Some(5));
        assert_eq!(config.default_difficulty, Difficulty::Hard);
        assert_eq!(config.session_queue_depth, 32);
        assert_eq!(config.log_filter, "game_server=debug");
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(ServerConfig::from_json("{").is_err());
        assert!(ServerConfig::from_json(r#"{"session_queue_depth":"many"}"#).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = ServerConfig::from_file(Path::new("/nonexistent/game-server.json")).unwrap_err();
        assert!(err.to_string().contains("无法读取配置文件"));
    }
}
