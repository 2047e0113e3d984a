//! 消息类型定义
//!
//! 走法与结果按游戏分别建模，每个变体只携带该游戏需要的字段

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::GameError;
use crate::yahtzee::Category;

/// 玩家 ID
pub type PlayerId = u64;

/// 对局 ID
pub type SessionId = u64;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 简单：随机合法走法
    Easy,
    /// 中等：启发式规则
    #[default]
    Medium,
    /// 困难：搜索 / 概率密度
    Hard,
}

/// 游戏种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    ConnectFour,
    Yahtzee,
}

/// 快艇骰子走法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum YahtzeeMove {
    /// 重掷未保留的骰子
    Roll,
    /// 设置保留的骰子（必须恰好 5 项）
    Hold { held: Vec<bool> },
    /// 锁定计分项
    Score { category: Category },
}

/// 四子棋走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectFourMove {
    pub column: usize,
}

/// 客户端提交的走法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameMove {
    ConnectFour(ConnectFourMove),
    Yahtzee(YahtzeeMove),
}

impl GameMove {
    pub fn kind(&self) -> GameKind {
        match self {
            GameMove::ConnectFour(_) => GameKind::ConnectFour,
            GameMove::Yahtzee(_) => GameKind::Yahtzee,
        }
    }

    /// 从 JSON 解析
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// 海战开火结果（由持有舰队的一方给出）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotResult {
    pub position: Position,
    pub hit: bool,
    pub sunk: bool,
}

/// 走法的应答：合法时携带数据，非法时携带原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse<T> {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> MoveResponse<T> {
    pub fn accepted(data: T) -> Self {
        Self {
            valid: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T> From<Result<T, GameError>> for MoveResponse<T> {
    fn from(result: Result<T, GameError>) -> Self {
        match result {
            Ok(data) => Self::accepted(data),
            Err(err) => Self::rejected(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_move_json() {
        let mv = GameMove::from_json(r#"{"game":"connect_four","column":3}"#).unwrap();
        assert_eq!(mv, GameMove::ConnectFour(ConnectFourMove { column: 3 }));

        let mv = GameMove::from_json(r#"{"game":"yahtzee","type":"roll"}"#).unwrap();
        assert_eq!(mv, GameMove::Yahtzee(YahtzeeMove::Roll));

        let mv = GameMove::from_json(
            r#"{"game":"yahtzee","type":"score","payload":{"category":"fullHouse"}}"#,
        )
        .unwrap();
        assert_eq!(
            mv,
            GameMove::Yahtzee(YahtzeeMove::Score {
                category: Category::FullHouse
            })
        );
        assert_eq!(mv.kind(), GameKind::Yahtzee);
    }

    #[test]
    fn test_malformed_move_is_error() {
        assert!(GameMove::from_json(r#"{"game":"chess"}"#).is_err());
        assert!(GameMove::from_json(r#"{"game":"yahtzee","type":"score","payload":{"category":"bogus"}}"#).is_err());
        assert!(GameMove::from_json("not json").is_err());
    }

    #[test]
    fn test_move_response_from_result() {
        let ok: MoveResponse<u32> = Ok(5).into();
        assert!(ok.valid);
        assert_eq!(ok.data, Some(5));

        let err: MoveResponse<u32> = Err(GameError::NotYourTurn).into();
        assert!(!err.valid);
        assert_eq!(err.message.as_deref(), Some("Not your turn"));

        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"valid":false,"message":"Not your turn"}"#);
    }

    #[test]
    fn test_difficulty_serde() {
        let d: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
