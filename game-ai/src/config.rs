//! AI 配置

use protocol::{Difficulty, CONNECT_FOUR_SEARCH_DEPTH};
use serde::{Deserialize, Serialize};

/// AI 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 四子棋搜索深度（仅困难难度使用）
    pub search_depth: u8,
    /// 海战追猎时是否只打棋盘格奇偶格
    pub parity_hunting: bool,
    /// 海战是否使用概率密度选点
    pub density_targeting: bool,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                search_depth: 0,
                parity_hunting: false,
                density_targeting: false,
            },
            Difficulty::Medium => Self {
                difficulty,
                search_depth: 0,
                parity_hunting: true,
                density_targeting: false,
            },
            Difficulty::Hard => Self {
                difficulty,
                search_depth: CONNECT_FOUR_SEARCH_DEPTH,
                parity_hunting: false,
                density_targeting: true,
            },
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_config() {
        let easy = AiConfig::from_difficulty(Difficulty::Easy);
        assert_eq!(easy.search_depth, 0);
        assert!(!easy.parity_hunting);

        let medium = AiConfig::from_difficulty(Difficulty::Medium);
        assert!(medium.parity_hunting);
        assert!(!medium.density_targeting);

        let hard = AiConfig::from_difficulty(Difficulty::Hard);
        assert_eq!(hard.search_depth, 7);
        assert!(hard.density_targeting);
    }
}
