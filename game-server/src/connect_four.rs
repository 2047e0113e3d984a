//! 四子棋引擎

use protocol::connect_four::{ConnectFourBoard, Disc};
use protocol::{
    ConnectFourMove, GameError, GameKind, GameMove, PlayerId, Position, CONNECT_LENGTH,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::TurnBasedGame;

/// 落子结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropOutcome {
    pub row: usize,
    pub column: usize,
    pub disc: Disc,
    pub winner: Option<PlayerId>,
    pub winning_line: Option<[Position; CONNECT_LENGTH]>,
    pub draw: bool,
}

/// 对局快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectFourSnapshot {
    pub board: ConnectFourBoard,
    pub red: PlayerId,
    pub yellow: PlayerId,
    pub current_player: Option<PlayerId>,
    pub moves: Vec<usize>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    pub winning_line: Option<[Position; CONNECT_LENGTH]>,
    /// 观察者执的棋子，旁观时为 None
    pub your_disc: Option<Disc>,
}

/// 四子棋引擎，红方先手
pub struct ConnectFourEngine {
    board: ConnectFourBoard,
    red: PlayerId,
    yellow: PlayerId,
    to_move: Disc,
    moves: Vec<usize>,
    game_over: bool,
    winner: Option<PlayerId>,
    winning_line: Option<[Position; CONNECT_LENGTH]>,
}

impl ConnectFourEngine {
    pub fn new(red: PlayerId, yellow: PlayerId) -> Self {
        info!(red, yellow, "四子棋开局");
        Self {
            board: ConnectFourBoard::new(),
            red,
            yellow,
            to_move: Disc::Red,
            moves: Vec::new(),
            game_over: false,
            winner: None,
            winning_line: None,
        }
    }

    pub fn board(&self) -> &ConnectFourBoard {
        &self.board
    }

    /// 玩家执的棋子
    pub fn disc_of(&self, player: PlayerId) -> Option<Disc> {
        if player == self.red {
            Some(Disc::Red)
        } else if player == self.yellow {
            Some(Disc::Yellow)
        } else {
            None
        }
    }

    fn player_of(&self, disc: Disc) -> PlayerId {
        match disc {
            Disc::Red => self.red,
            Disc::Yellow => self.yellow,
        }
    }

    fn finish(&mut self, winner: Option<PlayerId>) {
        self.game_over = true;
        self.winner = winner;
        info!(?winner, moves = self.moves.len(), "四子棋结束");
    }
}

impl TurnBasedGame for ConnectFourEngine {
    type Move = ConnectFourMove;
    type Outcome = DropOutcome;
    type Snapshot = ConnectFourSnapshot;

    fn kind(&self) -> GameKind {
        GameKind::ConnectFour
    }

    fn decode(mv: GameMove) -> Result<ConnectFourMove, GameError> {
        match mv {
            GameMove::ConnectFour(mv) => Ok(mv),
            _ => Err(GameError::WrongGame),
        }
    }

    fn current_player(&self) -> Option<PlayerId> {
        (!self.game_over).then(|| self.player_of(self.to_move))
    }

    fn make_move(&mut self, player: PlayerId, mv: ConnectFourMove) -> Result<DropOutcome, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        let disc = self.disc_of(player).ok_or(GameError::UnknownPlayer(player))?;
        if disc != self.to_move {
            return Err(GameError::NotYourTurn);
        }

        let column = mv.column;
        let row = self.board.drop_disc(column, disc)?;
        self.moves.push(column);
        self.to_move = disc.opponent();

        let winning_line = self.board.winning_line();
        let draw = winning_line.is_none() && self.board.is_full();
        if winning_line.is_some() {
            self.winning_line = winning_line;
            self.finish(Some(player));
        } else if draw {
            self.finish(None);
        }

        Ok(DropOutcome {
            row,
            column,
            disc,
            winner: self.winner,
            winning_line,
            draw,
        })
    }

    fn state(&self, viewer: Option<PlayerId>) -> ConnectFourSnapshot {
        ConnectFourSnapshot {
            board: self.board.clone(),
            red: self.red,
            yellow: self.yellow,
            current_player: self.current_player(),
            moves: self.moves.clone(),
            game_over: self.game_over,
            winner: self.winner,
            winning_line: self.winning_line,
            your_disc: viewer.and_then(|id| self.disc_of(id)),
        }
    }

    /// 离开的一方判负
    fn remove_player(&mut self, player: PlayerId) -> Result<(), GameError> {
        let disc = self.disc_of(player).ok_or(GameError::UnknownPlayer(player))?;
        info!(player, ?disc, "玩家离开四子棋");
        if !self.game_over {
            self.finish(Some(self.player_of(disc.opponent())));
        }
        Ok(())
    }

    fn is_over(&self) -> bool {
        self.game_over
    }

    fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    fn reset(&mut self) {
        *self = Self::new(self.red, self.yellow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: PlayerId = 10;
    const YELLOW: PlayerId = 20;

    fn play(engine: &mut ConnectFourEngine, columns: &[usize]) -> DropOutcome {
        let mut last = None;
        for &column in columns {
            let player = engine.current_player().unwrap();
            last = Some(engine.make_move(player, ConnectFourMove { column }).unwrap());
        }
        last.unwrap()
    }

    #[test]
    fn test_drop_reports_row() {
        let mut engine = ConnectFourEngine::new(RED, YELLOW);
        let outcome = engine.make_move(RED, ConnectFourMove { column: 3 }).unwrap();
        assert_eq!(outcome.row, 5);
        assert_eq!(outcome.disc, Disc::Red);
        assert_eq!(engine.current_player(), Some(YELLOW));

        let outcome = engine.make_move(YELLOW, ConnectFourMove { column: 3 }).unwrap();
        assert_eq!(outcome.row, 4);
    }

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let mut engine = ConnectFourEngine::new(RED, YELLOW);
        assert_eq!(
            engine.make_move(YELLOW, ConnectFourMove { column: 0 }),
            Err(GameError::NotYourTurn)
        );
        assert_eq!(
            engine.make_move(RED, ConnectFourMove { column: 7 }),
            Err(GameError::ColumnOutOfRange(7))
        );
        assert_eq!(
            engine.make_move(99, ConnectFourMove { column: 0 }),
            Err(GameError::UnknownPlayer(99))
        );
        assert_eq!(engine.board(), &ConnectFourBoard::new());
        assert_eq!(engine.current_player(), Some(RED));
    }

    #[test]
    fn test_full_column_rejected() {
        let mut engine = ConnectFourEngine::new(RED, YELLOW);
        play(&mut engine, &[0, 0, 0, 0, 0, 0]);
        let response = engine.submit(RED, ConnectFourMove { column: 0 });
        assert!(!response.valid);
        assert_eq!(response.message.as_deref(), Some("Column 0 is full"));
    }

    #[test]
    fn test_vertical_win() {
        let mut engine = ConnectFourEngine::new(RED, YELLOW);
        let outcome = play(&mut engine, &[0, 1, 0, 1, 0, 1, 0]);
        assert_eq!(outcome.winner, Some(RED));
        assert_eq!(outcome.winning_line.map(|line| line.len()), Some(4));
        assert!(engine.is_over());
        assert_eq!(
            engine.make_move(YELLOW, ConnectFourMove { column: 1 }),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn test_draw() {
        let mut engine = ConnectFourEngine::new(RED, YELLOW);
        // 列序 0,1 交替填满两列后换下两列，不会连成四子
        let order = [0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0];
        play(&mut engine, &order);
        play(&mut engine, &order.map(|c| c + 2));
        play(&mut engine, &order.map(|c| c + 4));
        let outcome = play(&mut engine, &[6, 6, 6, 6, 6, 6]);
        assert!(outcome.draw);
        assert_eq!(outcome.winner, None);
        assert!(engine.is_over());
    }

    #[test]
    fn test_remove_player_forfeits() {
        let mut engine = ConnectFourEngine::new(RED, YELLOW);
        engine.remove_player(RED).unwrap();
        assert!(engine.is_over());
        assert_eq!(engine.winner(), Some(YELLOW));
        assert_eq!(engine.remove_player(5), Err(GameError::UnknownPlayer(5)));
    }

    #[test]
    fn test_snapshot_and_reset() {
        let mut engine = ConnectFourEngine::new(RED, YELLOW);
        play(&mut engine, &[3, 4]);

        let snapshot = engine.state(Some(YELLOW));
        assert_eq!(snapshot.your_disc, Some(Disc::Yellow));
        assert_eq!(snapshot.moves, vec![3, 4]);
        assert_eq!(engine.state(None).your_disc, None);

        engine.reset();
        assert_eq!(engine.board(), &ConnectFourBoard::new());
        assert_eq!(engine.current_player(), Some(RED));
    }
}
