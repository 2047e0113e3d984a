//! 错误类型定义

use thiserror::Error;

/// 规则错误（走法被拒绝的原因）
///
/// 所有变体都是可恢复的：调用方收到后重新提交即可。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 不是你的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 玩家不在本局中
    #[error("Unknown player: {0}")]
    UnknownPlayer(u64),

    /// 本回合掷骰次数已用完
    #[error("No rolls left this turn")]
    NoRollsLeft,

    /// 需要先掷骰
    #[error("You must roll before holding or scoring")]
    MustRollFirst,

    /// 保留骰子数组长度错误
    #[error("Hold mask must have {expected} entries, got {actual}")]
    InvalidHold { expected: usize, actual: usize },

    /// 计分项已锁定
    #[error("Category {0} is already scored")]
    CategoryLocked(String),

    /// 列号越界
    #[error("Column {0} is out of range")]
    ColumnOutOfRange(usize),

    /// 该列已满
    #[error("Column {0} is full")]
    ColumnFull(usize),

    /// 手牌张数错误
    #[error("Hand must contain {expected} cards, got {actual}")]
    InvalidHandSize { expected: usize, actual: usize },

    /// 舰队放置重试次数耗尽
    #[error("Could not place fleet after {0} attempts")]
    PlacementExhausted(usize),

    /// 走法与游戏类型不匹配
    #[error("Move does not belong to this game")]
    WrongGame,
}

/// 协议错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 规则错误
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    /// 对局已关闭
    #[error("Session closed")]
    SessionClosed,
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
