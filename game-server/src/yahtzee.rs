//! 快艇骰子引擎

use protocol::yahtzee::{total_score, upper_bonus, Category, Dice, Scorecard};
use protocol::{
    GameError, GameKind, GameMove, PlayerId, YahtzeeMove, CATEGORY_COUNT, DICE_COUNT,
    ROLLS_PER_TURN,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::TurnBasedGame;

/// 玩家计分记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub locked_scores: Scorecard,
}

impl PlayerRecord {
    fn new(id: PlayerId) -> Self {
        Self {
            id,
            locked_scores: [None; CATEGORY_COUNT],
        }
    }

    pub fn total(&self) -> u32 {
        total_score(&self.locked_scores)
    }

    pub fn is_complete(&self) -> bool {
        self.locked_scores.iter().all(Option::is_some)
    }
}

/// 走法结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum YahtzeeOutcome {
    Rolled {
        dice: Dice,
        rolls_left: u8,
    },
    Held {
        held: [bool; DICE_COUNT],
    },
    Scored {
        category: Category,
        points: u32,
        total: u32,
        next_player: Option<PlayerId>,
        game_over: bool,
        winner: Option<PlayerId>,
    },
}

/// 每个玩家的公开计分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub id: PlayerId,
    pub scores: Scorecard,
    pub upper_bonus: u32,
    pub total: u32,
}

/// 可广播的对局快照（计分全部公开）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YahtzeeSnapshot {
    pub players: Vec<PlayerScore>,
    pub current_player: Option<PlayerId>,
    pub dice: Dice,
    pub held: [bool; DICE_COUNT],
    pub rolls_left: u8,
    pub round: u32,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    /// 观察者是否为当前玩家
    pub your_turn: bool,
}

/// 快艇骰子引擎
pub struct YahtzeeEngine {
    players: Vec<PlayerRecord>,
    current_player_index: usize,
    /// 全 0 表示本回合尚未掷骰
    dice: Dice,
    held: [bool; DICE_COUNT],
    rolls_left: u8,
    round: u32,
    game_over: bool,
    winner: Option<PlayerId>,
    rng: ChaCha8Rng,
}

impl YahtzeeEngine {
    pub fn new(players: &[PlayerId]) -> Self {
        Self::with_rng(players, ChaCha8Rng::from_entropy())
    }

    /// 固定随机种子（测试与复盘）
    pub fn with_seed(players: &[PlayerId], seed: u64) -> Self {
        Self::with_rng(players, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(players: &[PlayerId], rng: ChaCha8Rng) -> Self {
        let mut engine = Self {
            players: players.iter().copied().map(PlayerRecord::new).collect(),
            current_player_index: 0,
            dice: [0; DICE_COUNT],
            held: [false; DICE_COUNT],
            rolls_left: ROLLS_PER_TURN,
            round: 1,
            game_over: false,
            winner: None,
            rng,
        };
        engine.game_over = engine.players.is_empty();
        info!(players = engine.players.len(), "快艇骰子开局");
        engine
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn dice(&self) -> Dice {
        self.dice
    }

    pub fn rolls_left(&self) -> u8 {
        self.rolls_left
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// 尚未锁定的计分项
    pub fn open_categories(&self, player: PlayerId) -> Vec<Category> {
        self.players
            .iter()
            .find(|p| p.id == player)
            .map(|record| {
                Category::ALL
                    .iter()
                    .copied()
                    .filter(|c| record.locked_scores[c.index()].is_none())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn check_turn(&self, player: PlayerId) -> Result<(), GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if !self.players.iter().any(|p| p.id == player) {
            return Err(GameError::UnknownPlayer(player));
        }
        if self.players[self.current_player_index].id != player {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    fn has_rolled(&self) -> bool {
        self.rolls_left < ROLLS_PER_TURN
    }

    fn roll(&mut self) -> Result<YahtzeeOutcome, GameError> {
        if self.rolls_left == 0 {
            return Err(GameError::NoRollsLeft);
        }
        for (die, &held) in self.dice.iter_mut().zip(&self.held) {
            if !held {
                *die = self.rng.gen_range(1..=6);
            }
        }
        self.rolls_left -= 1;
        debug!(dice = ?self.dice, rolls_left = self.rolls_left, "掷骰");
        Ok(YahtzeeOutcome::Rolled {
            dice: self.dice,
            rolls_left: self.rolls_left,
        })
    }

    fn hold(&mut self, held: &[bool]) -> Result<YahtzeeOutcome, GameError> {
        if !self.has_rolled() {
            return Err(GameError::MustRollFirst);
        }
        let held: [bool; DICE_COUNT] = held.try_into().map_err(|_| GameError::InvalidHold {
            expected: DICE_COUNT,
            actual: held.len(),
        })?;
        self.held = held;
        Ok(YahtzeeOutcome::Held { held })
    }

    fn score(&mut self, category: Category) -> Result<YahtzeeOutcome, GameError> {
        if !self.has_rolled() {
            return Err(GameError::MustRollFirst);
        }
        let index = self.current_player_index;
        if self.players[index].locked_scores[category.index()].is_some() {
            return Err(GameError::CategoryLocked(category.to_string()));
        }

        let points = category.score(&self.dice);
        let record = &mut self.players[index];
        record.locked_scores[category.index()] = Some(points);
        let total = record.total();
        info!(player = record.id, %category, points, total, "锁定计分");

        self.advance_turn();
        Ok(YahtzeeOutcome::Scored {
            category,
            points,
            total,
            next_player: self.current_player(),
            game_over: self.game_over,
            winner: self.winner,
        })
    }

    fn advance_turn(&mut self) {
        self.current_player_index += 1;
        if self.current_player_index >= self.players.len() {
            self.current_player_index = 0;
            self.round += 1;
        }
        self.reset_turn();
        self.check_game_over();
    }

    fn reset_turn(&mut self) {
        self.dice = [0; DICE_COUNT];
        self.held = [false; DICE_COUNT];
        self.rolls_left = ROLLS_PER_TURN;
    }

    fn check_game_over(&mut self) {
        if self.game_over || !self.players.iter().all(PlayerRecord::is_complete) {
            return;
        }
        self.finish(self.leader());
    }

    /// 总分最高者，同分取座位靠前者
    fn leader(&self) -> Option<PlayerId> {
        let mut best: Option<&PlayerRecord> = None;
        for record in &self.players {
            if best.map_or(true, |b| record.total() > b.total()) {
                best = Some(record);
            }
        }
        best.map(|record| record.id)
    }

    fn finish(&mut self, winner: Option<PlayerId>) {
        self.game_over = true;
        self.winner = winner;
        info!(?winner, round = self.round, "快艇骰子结束");
    }
}

impl TurnBasedGame for YahtzeeEngine {
    type Move = YahtzeeMove;
    type Outcome = YahtzeeOutcome;
    type Snapshot = YahtzeeSnapshot;

    fn kind(&self) -> GameKind {
        GameKind::Yahtzee
    }

    fn decode(mv: GameMove) -> Result<YahtzeeMove, GameError> {
        match mv {
            GameMove::Yahtzee(mv) => Ok(mv),
            _ => Err(GameError::WrongGame),
        }
    }

    fn current_player(&self) -> Option<PlayerId> {
        if self.game_over {
            return None;
        }
        self.players.get(self.current_player_index).map(|p| p.id)
    }

    fn make_move(&mut self, player: PlayerId, mv: YahtzeeMove) -> Result<YahtzeeOutcome, GameError> {
        self.check_turn(player)?;
        match mv {
            YahtzeeMove::Roll => self.roll(),
            YahtzeeMove::Hold { held } => self.hold(&held),
            YahtzeeMove::Score { category } => self.score(category),
        }
    }

    fn state(&self, viewer: Option<PlayerId>) -> YahtzeeSnapshot {
        let current_player = self.current_player();
        YahtzeeSnapshot {
            players: self
                .players
                .iter()
                .map(|record| PlayerScore {
                    id: record.id,
                    scores: record.locked_scores,
                    upper_bonus: upper_bonus(&record.locked_scores),
                    total: record.total(),
                })
                .collect(),
            current_player,
            dice: self.dice,
            held: self.held,
            rolls_left: self.rolls_left,
            round: self.round,
            game_over: self.game_over,
            winner: self.winner,
            your_turn: viewer.is_some() && viewer == current_player,
        }
    }

    fn remove_player(&mut self, player: PlayerId) -> Result<(), GameError> {
        let index = self
            .players
            .iter()
            .position(|p| p.id == player)
            .ok_or(GameError::UnknownPlayer(player))?;
        self.players.remove(index);
        info!(player, remaining = self.players.len(), "玩家离开快艇骰子");

        if self.game_over {
            self.current_player_index = 0;
            return Ok(());
        }

        match self.players.len() {
            0 => {
                self.current_player_index = 0;
                self.finish(None);
                return Ok(());
            }
            1 => {
                self.current_player_index = 0;
                let last = self.players[0].id;
                self.finish(Some(last));
                return Ok(());
            }
            _ => {}
        }

        if index < self.current_player_index {
            self.current_player_index -= 1;
        } else if index == self.current_player_index {
            // 离开的是当前玩家，轮到下一位
            if self.current_player_index >= self.players.len() {
                self.current_player_index = 0;
                self.round += 1;
            }
            self.reset_turn();
        }
        self.check_game_over();
        Ok(())
    }

    fn is_over(&self) -> bool {
        self.game_over
    }

    fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    fn reset(&mut self) {
        for record in &mut self.players {
            record.locked_scores = [None; CATEGORY_COUNT];
        }
        self.current_player_index = 0;
        self.round = 1;
        self.reset_turn();
        self.winner = None;
        self.game_over = self.players.is_empty();
        info!(players = self.players.len(), "快艇骰子重新开局");
    }
}
