//! 棋牌游戏服务端
//!
//! 包含:
//! - 回合制引擎约定
//! - 快艇骰子、四子棋引擎
//! - 对局会话（引擎 + AI 座位）
//! - 服务端配置

pub mod config;
pub mod connect_four;
pub mod engine;
pub mod session;
pub mod yahtzee;

pub use config::ServerConfig;
pub use connect_four::{ConnectFourEngine, ConnectFourSnapshot, DropOutcome};
pub use engine::TurnBasedGame;
pub use session::{AiSeat, ConnectFourSeat, SessionHandle};
pub use yahtzee::{PlayerRecord, YahtzeeEngine, YahtzeeOutcome, YahtzeeSnapshot};
