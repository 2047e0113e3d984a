//! 游戏 AI
//!
//! 包含:
//! - 四子棋评估函数与 Alpha-Beta 搜索
//! - 海战棋追猎/锁定与概率密度策略
//! - 按难度派生的 AI 配置

mod battleship;
mod config;
mod evaluate;
mod search;

use protocol::Difficulty;
use rand::Rng;

pub use battleship::{Axis, BattleshipAi, HuntState};
pub use config::AiConfig;
pub use evaluate::Evaluator;
pub use search::ConnectFourAi;

/// 可以替某个席位选择走法的 AI
pub trait GameAi {
    type Board;
    type Move;

    /// 无合法走法时返回 None
    fn choose_move<R: Rng>(
        &mut self,
        board: &Self::Board,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<Self::Move>;
}
