//! 四子棋局面评估函数

use protocol::connect_four::{ConnectFourBoard, Disc};
use protocol::{CONNECT_FOUR_COLS, CONNECT_FOUR_ROWS, CONNECT_LENGTH};

/// 评估器
pub struct Evaluator;

/// 评估权重
///
/// 对手的两子窗口不计分、堵截分低于进攻分，属于有意调校，不要对称化。
mod weights {
    /// 中心列每个己方棋子
    pub const CENTER_PIECE: i32 = 3;
    pub const OWN_FOUR: i32 = 100;
    pub const OWN_THREE: i32 = 5;
    pub const OWN_TWO: i32 = 2;
    pub const OPPONENT_FOUR: i32 = -100;
    pub const OPPONENT_THREE: i32 = -4;
}

/// 窗口方向：横、竖、右下斜、右上斜
const WINDOW_DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

impl Evaluator {
    /// 评估棋局（`me` 视角，正值对 `me` 有利）
    pub fn evaluate(board: &ConnectFourBoard, me: Disc) -> i32 {
        let center = CONNECT_FOUR_COLS / 2;
        let center_count = (0..CONNECT_FOUR_ROWS)
            .filter(|&row| board.get(row, center) == Some(me))
            .count() as i32;

        let mut score = center_count * weights::CENTER_PIECE;
        for window in Self::windows(board) {
            score += Self::score_window(&window, me);
        }
        score
    }

    /// 单个四格窗口的得分
    pub fn score_window(window: &[Option<Disc>; CONNECT_LENGTH], me: Disc) -> i32 {
        let own = window.iter().filter(|&&c| c == Some(me)).count();
        let opponent = window.iter().filter(|&&c| c == Some(me.opponent())).count();
        let empty = CONNECT_LENGTH - own - opponent;

        if own > 0 && opponent > 0 {
            return 0;
        }
        match (own, opponent, empty) {
            (4, _, _) => weights::OWN_FOUR,
            (3, _, 1) => weights::OWN_THREE,
            (2, _, 2) => weights::OWN_TWO,
            (_, 4, _) => weights::OPPONENT_FOUR,
            (_, 3, 1) => weights::OPPONENT_THREE,
            _ => 0,
        }
    }

    /// 枚举所有四格窗口
    fn windows(board: &ConnectFourBoard) -> Vec<[Option<Disc>; CONNECT_LENGTH]> {
        let rows = CONNECT_FOUR_ROWS as isize;
        let cols = CONNECT_FOUR_COLS as isize;
        let span = CONNECT_LENGTH as isize - 1;
        let mut windows = Vec::new();

        for row in 0..rows {
            for col in 0..cols {
                for (d_row, d_col) in WINDOW_DIRECTIONS {
                    let end_row = row + d_row * span;
                    let end_col = col + d_col * span;
                    if end_row < 0 || end_row >= rows || end_col < 0 || end_col >= cols {
                        continue;
                    }
                    let mut window = [None; CONNECT_LENGTH];
                    for (i, cell) in window.iter_mut().enumerate() {
                        let r = (row + d_row * i as isize) as usize;
                        let c = (col + d_col * i as isize) as usize;
                        *cell = board.get(r, c);
                    }
                    windows.push(window);
                }
            }
        }
        windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_zero() {
        let board = ConnectFourBoard::new();
        assert_eq!(Evaluator::evaluate(&board, Disc::Red), 0);
    }

    #[test]
    fn test_window_count() {
        // 横 24 + 竖 21 + 两条斜线各 12
        assert_eq!(Evaluator::windows(&ConnectFourBoard::new()).len(), 69);
    }

    #[test]
    fn test_window_weights() {
        let r = Some(Disc::Red);
        let y = Some(Disc::Yellow);
        assert_eq!(Evaluator::score_window(&[r, r, r, r], Disc::Red), 100);
        assert_eq!(Evaluator::score_window(&[r, r, r, None], Disc::Red), 5);
        assert_eq!(Evaluator::score_window(&[r, None, r, None], Disc::Red), 2);
        assert_eq!(Evaluator::score_window(&[y, y, y, y], Disc::Red), -100);
        assert_eq!(Evaluator::score_window(&[y, y, None, y], Disc::Red), -4);
        // 对手两子不计分
        assert_eq!(Evaluator::score_window(&[y, y, None, None], Disc::Red), 0);
        // 混合窗口
        assert_eq!(Evaluator::score_window(&[r, r, r, y], Disc::Red), 0);
        assert_eq!(Evaluator::score_window(&[r, None, None, None], Disc::Red), 0);
    }

    #[test]
    fn test_center_piece_bonus() {
        let mut center = ConnectFourBoard::new();
        center.drop_disc(3, Disc::Red).unwrap();
        let mut edge = ConnectFourBoard::new();
        edge.drop_disc(0, Disc::Red).unwrap();

        // 单子不构成两子窗口，只有中心加分
        assert_eq!(Evaluator::evaluate(&center, Disc::Red), 3);
        assert_eq!(Evaluator::evaluate(&edge, Disc::Red), 0);
    }

    #[test]
    fn test_perspective_asymmetry() {
        let board = ConnectFourBoard::from_rows(&[
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "RR.....",
        ]);
        // 红方有两子窗口加分，黄方视角下对手两子不扣分
        assert!(Evaluator::evaluate(&board, Disc::Red) > 0);
        assert_eq!(Evaluator::evaluate(&board, Disc::Yellow), 0);
    }
}
