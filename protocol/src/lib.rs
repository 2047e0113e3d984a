//! 棋牌游戏共享协议库
//!
//! 包含:
//! - 通用棋盘与位置
//! - 四子棋、海战棋规则
//! - 扑克牌与牌型评估（含百搭）
//! - 快艇骰子计分规则
//! - 走法与应答消息类型
//! - 错误类型

mod board;
mod constants;
mod error;
mod message;

pub mod battleship;
pub mod cards;
pub mod connect_four;
pub mod poker;
pub mod yahtzee;

pub use board::{Grid, Position};
pub use constants::*;
pub use error::{GameError, ProtocolError, Result};
pub use message::{
    ConnectFourMove, Difficulty, GameKind, GameMove, MoveResponse, PlayerId, SessionId,
    ShotResult, YahtzeeMove,
};
