//! 四子棋搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝，走法按中心优先排序

use protocol::connect_four::{ConnectFourBoard, Disc};
use protocol::{Difficulty, CENTER_ORDER};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::config::AiConfig;
use crate::evaluate::Evaluator;
use crate::GameAi;

/// 终局基础分，实际分值为 ±(WIN_SCORE + 剩余深度)，越快取胜分越高
const WIN_SCORE: i32 = 1000;

/// 四子棋 AI
pub struct ConnectFourAi {
    disc: Disc,
    search_depth: u8,
    nodes_searched: u64,
}

impl ConnectFourAi {
    /// 创建执 `disc` 的 AI（困难难度使用默认搜索深度）
    pub fn new(disc: Disc) -> Self {
        Self::with_config(disc, AiConfig::from_difficulty(Difficulty::Hard))
    }

    /// 从配置创建
    pub fn with_config(disc: Disc, config: AiConfig) -> Self {
        Self {
            disc,
            search_depth: config.search_depth,
            nodes_searched: 0,
        }
    }

    pub fn disc(&self) -> Disc {
        self.disc
    }

    /// 选择落子列，棋盘已满时返回 None
    pub fn get_move<R: Rng>(
        &mut self,
        board: &ConnectFourBoard,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<usize> {
        let legal = board.legal_columns();
        if legal.is_empty() {
            return None;
        }

        let column = match difficulty {
            Difficulty::Easy => legal.choose(rng).copied(),
            Difficulty::Medium => self.rule_based(board, &legal, rng),
            Difficulty::Hard => self.search(board),
        };
        debug!(?difficulty, ?column, disc = ?self.disc, "四子棋 AI 选择");
        column
    }

    /// 中等难度：能赢就赢，能堵就堵，否则按中心优先
    fn rule_based<R: Rng>(
        &self,
        board: &ConnectFourBoard,
        legal: &[usize],
        rng: &mut R,
    ) -> Option<usize> {
        let me = self.disc;
        let completes = |col: usize, disc: Disc| {
            board
                .with_move(col, disc)
                .is_some_and(|next| next.check_winner() == Some(disc))
        };

        if let Some(&col) = legal.iter().find(|&&col| completes(col, me)) {
            return Some(col);
        }
        if let Some(&col) = legal.iter().find(|&&col| completes(col, me.opponent())) {
            return Some(col);
        }
        if let Some(&col) = CENTER_ORDER.iter().find(|col| legal.contains(col)) {
            return Some(col);
        }
        legal.choose(rng).copied()
    }

    /// 困难难度：固定深度的 Alpha-Beta 搜索
    pub fn search(&mut self, board: &ConnectFourBoard) -> Option<usize> {
        self.nodes_searched = 0;
        if self.search_depth == 0 {
            return ordered_columns(board).first().copied();
        }

        let mut best_move = None;
        let mut best_score = i32::MIN;

        for col in ordered_columns(board) {
            let Some(child) = board.with_move(col, self.disc) else {
                continue;
            };
            let score = self.alpha_beta(&child, self.search_depth - 1, best_score, i32::MAX, false);
            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(col);
            }
        }

        debug!(
            nodes = self.nodes_searched,
            best_score,
            ?best_move,
            "四子棋搜索完成"
        );
        best_move
    }

    /// Alpha-Beta 搜索（`maximizing` 为 true 时轮到 AI 落子）
    fn alpha_beta(
        &mut self,
        board: &ConnectFourBoard,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes_searched += 1;

        if let Some(winner) = board.check_winner() {
            let score = WIN_SCORE + depth as i32;
            return if winner == self.disc { score } else { -score };
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return Evaluator::evaluate(board, self.disc);
        }

        let disc = if maximizing {
            self.disc
        } else {
            self.disc.opponent()
        };

        let mut value = if maximizing { i32::MIN } else { i32::MAX };
        for col in ordered_columns(board) {
            let Some(child) = board.with_move(col, disc) else {
                continue;
            };
            let score = self.alpha_beta(&child, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        value
    }

    /// 获取最近一次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl GameAi for ConnectFourAi {
    type Board = ConnectFourBoard;
    type Move = usize;

    fn choose_move<R: Rng>(
        &mut self,
        board: &ConnectFourBoard,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<usize> {
        self.get_move(board, difficulty, rng)
    }
}

/// 按中心优先顺序排列的合法列
fn ordered_columns(board: &ConnectFourBoard) -> Vec<usize> {
    CENTER_ORDER
        .iter()
        .copied()
        .filter(|&col| board.is_column_open(col))
        .collect()
}
