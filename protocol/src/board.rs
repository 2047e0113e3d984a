//! 通用棋盘
//!
//! 各游戏共用的定长网格，格子内容由具体游戏决定

use serde::{Deserialize, Serialize};

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 行（0 为最上方）
    pub row: u8,
    /// 列
    pub col: u8,
}

impl Position {
    /// 创建新位置
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 上下左右四个方向
    pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 定长网格，索引为 row * cols + col
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<C> {
    rows: usize,
    cols: usize,
    cells: Vec<C>,
}

impl<C: Copy> Grid<C> {
    /// 创建以 `fill` 填充的网格
    pub fn new(rows: usize, cols: usize, fill: C) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 检查位置是否在网格内
    pub fn contains(&self, pos: Position) -> bool {
        (pos.row as usize) < self.rows && (pos.col as usize) < self.cols
    }

    /// 获取指定位置的格子
    pub fn get(&self, pos: Position) -> Option<C> {
        if self.contains(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// 设置指定位置的格子，越界时忽略
    pub fn set(&mut self, pos: Position, cell: C) {
        if self.contains(pos) {
            let index = self.index(pos);
            self.cells[index] = cell;
        }
    }

    /// 获取偏移后的位置（越界返回 None）
    pub fn offset(&self, pos: Position, d_row: i8, d_col: i8) -> Option<Position> {
        let row = pos.row as i16 + d_row as i16;
        let col = pos.col as i16 + d_col as i16;
        if row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols {
            Some(Position::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// 按行优先顺序遍历所有位置
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| Position::new(row as u8, col as u8))
        })
    }

    /// 按行优先顺序遍历所有 (位置, 格子)
    pub fn iter(&self) -> impl Iterator<Item = (Position, C)> + '_ {
        self.positions().map(move |pos| (pos, self.cells[self.index(pos)]))
    }

    fn index(&self, pos: Position) -> usize {
        pos.row as usize * self.cols + pos.col as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(3, 4, 0u8);
        grid.set(Position::new(2, 3), 7);

        assert_eq!(grid.get(Position::new(2, 3)), Some(7));
        assert_eq!(grid.get(Position::new(0, 0)), Some(0));
        assert_eq!(grid.get(Position::new(3, 0)), None);
    }

    #[test]
    fn test_set_out_of_bounds_ignored() {
        let mut grid = Grid::new(2, 2, false);
        grid.set(Position::new(5, 5), true);
        assert!(grid.iter().all(|(_, cell)| !cell));
    }

    #[test]
    fn test_offset() {
        let grid = Grid::new(10, 10, ());
        let corner = Position::new(0, 0);

        assert_eq!(grid.offset(corner, 1, 1), Some(Position::new(1, 1)));
        assert_eq!(grid.offset(corner, -1, 0), None);
        assert_eq!(grid.offset(Position::new(9, 9), 0, 1), None);
    }

    #[test]
    fn test_positions_row_major() {
        let grid = Grid::new(2, 3, ());
        let positions: Vec<_> = grid.positions().collect();

        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[1], Position::new(0, 1));
        assert_eq!(positions[3], Position::new(1, 0));
    }

    #[test]
    fn test_clone_is_independent() {
        let grid = Grid::new(2, 2, 0);
        let mut copy = grid.clone();
        copy.set(Position::new(0, 0), 1);

        assert_eq!(grid.get(Position::new(0, 0)), Some(0));
        assert_eq!(copy.get(Position::new(0, 0)), Some(1));
    }
}
