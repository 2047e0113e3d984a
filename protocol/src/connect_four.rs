//! 四子棋规则
//!
//! 包含落子、合法列生成与连珠检测

use serde::{Deserialize, Serialize};

use crate::board::{Grid, Position};
use crate::constants::{CONNECT_FOUR_COLS, CONNECT_FOUR_ROWS, CONNECT_LENGTH};
use crate::error::GameError;

/// 棋子颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disc {
    /// 红方（先手）
    Red,
    /// 黄方（后手）
    Yellow,
}

impl Disc {
    /// 获取对方颜色
    pub fn opponent(&self) -> Disc {
        match self {
            Disc::Red => Disc::Yellow,
            Disc::Yellow => Disc::Red,
        }
    }
}

/// 扫描方向：右、下、右下、左下
const DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// 四子棋棋盘（6 行 7 列，第 0 行在最上方）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectFourBoard {
    grid: Grid<Option<Disc>>,
}

impl ConnectFourBoard {
    /// 创建空棋盘
    pub fn new() -> Self {
        Self {
            grid: Grid::new(CONNECT_FOUR_ROWS, CONNECT_FOUR_COLS, None),
        }
    }

    /// 从字符行构造棋盘（'R' 红，'Y' 黄，其余为空），主要用于测试
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate().take(CONNECT_FOUR_ROWS) {
            for (col, ch) in line.chars().enumerate().take(CONNECT_FOUR_COLS) {
                let disc = match ch {
                    'R' | 'r' => Some(Disc::Red),
                    'Y' | 'y' => Some(Disc::Yellow),
                    _ => None,
                };
                board.grid.set(Position::new(row as u8, col as u8), disc);
            }
        }
        board
    }

    /// 获取指定位置的棋子
    pub fn get(&self, row: usize, col: usize) -> Option<Disc> {
        self.grid
            .get(Position::new(row as u8, col as u8))
            .flatten()
    }

    /// 底层网格
    pub fn grid(&self) -> &Grid<Option<Disc>> {
        &self.grid
    }

    /// 检查该列是否还能落子
    pub fn is_column_open(&self, col: usize) -> bool {
        col < CONNECT_FOUR_COLS && self.get(0, col).is_none()
    }

    /// 所有可落子的列（升序）
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..CONNECT_FOUR_COLS)
            .filter(|&col| self.is_column_open(col))
            .collect()
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        (0..CONNECT_FOUR_COLS).all(|col| !self.is_column_open(col))
    }

    /// 在指定列落子，返回落点所在行
    pub fn drop_disc(&mut self, col: usize, disc: Disc) -> Result<usize, GameError> {
        if col >= CONNECT_FOUR_COLS {
            return Err(GameError::ColumnOutOfRange(col));
        }
        for row in (0..CONNECT_FOUR_ROWS).rev() {
            if self.get(row, col).is_none() {
                self.grid
                    .set(Position::new(row as u8, col as u8), Some(disc));
                return Ok(row);
            }
        }
        Err(GameError::ColumnFull(col))
    }

    /// 在副本上落子，原棋盘不变（搜索时使用）
    pub fn with_move(&self, col: usize, disc: Disc) -> Option<Self> {
        let mut next = self.clone();
        next.drop_disc(col, disc).ok()?;
        Some(next)
    }

    /// 检查胜者
    pub fn check_winner(&self) -> Option<Disc> {
        self.find_line().map(|(disc, _)| disc)
    }

    /// 获取连珠位置（行优先、方向次序的第一条）
    pub fn winning_line(&self) -> Option<[Position; CONNECT_LENGTH]> {
        self.find_line().map(|(_, line)| line)
    }

    fn find_line(&self) -> Option<(Disc, [Position; CONNECT_LENGTH])> {
        for (start, cell) in self.grid.iter() {
            let Some(disc) = cell else { continue };
            for (d_row, d_col) in DIRECTIONS {
                let mut line = [start; CONNECT_LENGTH];
                let mut pos = start;
                let mut complete = true;
                for slot in line.iter_mut().skip(1) {
                    match self.grid.offset(pos, d_row, d_col) {
                        Some(next) if self.grid.get(next) == Some(Some(disc)) => {
                            *slot = next;
                            pos = next;
                        }
                        _ => {
                            complete = false;
                            break;
                        }
                    }
                }
                if complete {
                    return Some((disc, line));
                }
            }
        }
        None
    }
}

impl Default for ConnectFourBoard {
    fn default() -> Self {
        Self::new()
    }
}
