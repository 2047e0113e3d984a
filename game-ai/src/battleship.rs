//! 海战棋 AI
//!
//! - 简单：随机开火
//! - 中等：追猎/锁定（命中后攻击相邻格，未命中时只打奇偶格）
//! - 困难：概率密度（统计所有仍可能的摆放覆盖每格的次数）

use std::collections::{HashSet, VecDeque};

use protocol::battleship::{generate_ship_placements, ShipPlacement, Shot, TrackingBoard};
use protocol::{
    Difficulty, GameError, Grid, Position, ShotResult, BATTLESHIP_SIZE, FLEET_LENGTHS,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AiConfig;
use crate::GameAi;

/// 已推断出的船身方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl Axis {
    fn steps(&self) -> &'static [(i8, i8)] {
        match self {
            Axis::None => &Position::ORTHOGONAL,
            Axis::Horizontal => &[(0, -1), (0, 1)],
            Axis::Vertical => &[(-1, 0), (1, 0)],
        }
    }
}

/// 追猎状态，仅由 `notify_result` 修改
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HuntState {
    pub last_hit: Option<Position>,
    /// 尚未击沉的命中序列
    pub hit_chain: Vec<Position>,
    /// 待攻击的目标队列
    pub targets: VecDeque<Position>,
    pub direction: Axis,
}

impl HuntState {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// 海战棋 AI
pub struct BattleshipAi {
    hunt: HuntState,
    /// 已开火的格子（来自结果通知）
    fired: HashSet<Position>,
    /// 剩余未击沉船只的长度
    remaining: Vec<usize>,
}

impl BattleshipAi {
    pub fn new() -> Self {
        Self {
            hunt: HuntState::default(),
            fired: HashSet::new(),
            remaining: FLEET_LENGTHS.to_vec(),
        }
    }

    /// 新开一局
    pub fn reset(&mut self) {
        self.hunt.clear();
        self.fired.clear();
        self.remaining = FLEET_LENGTHS.to_vec();
    }

    pub fn hunt_state(&self) -> &HuntState {
        &self.hunt
    }

    pub fn remaining_ships(&self) -> &[usize] {
        &self.remaining
    }

    /// 随机布阵
    pub fn generate_ship_placements<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<ShipPlacement>, GameError> {
        generate_ship_placements(rng)
    }

    /// 选择下一次开火位置，所有格子都已开火时返回 None
    pub fn get_attack_move<R: Rng>(
        &mut self,
        tracking: &TrackingBoard,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<Position> {
        let unfired = tracking.unfired_cells();
        if unfired.is_empty() {
            return None;
        }

        let config = AiConfig::from_difficulty(difficulty);
        let target = if difficulty == Difficulty::Easy {
            unfired.choose(rng).copied()
        } else if let Some(target) = self.pop_target(tracking) {
            Some(target)
        } else if config.density_targeting {
            self.densest_cell(tracking, &unfired, rng)
        } else if config.parity_hunting {
            let parity: Vec<Position> = unfired
                .iter()
                .copied()
                .filter(|p| (p.row + p.col) % 2 == 0)
                .collect();
            parity.choose(rng).or_else(|| unfired.choose(rng)).copied()
        } else {
            unfired.choose(rng).copied()
        };

        debug!(?difficulty, ?target, queued = self.hunt.targets.len(), "海战 AI 选择");
        target
    }

    /// 每次开火后必须调用
    pub fn notify_result(&mut self, pos: Position, hit: bool, sunk: bool) {
        self.fired.insert(pos);
        self.hunt.targets.retain(|&t| t != pos);

        if hit && sunk {
            let length = self.hunt.hit_chain.len() + 1;
            self.mark_sunk(length);
            self.hunt.clear();
            return;
        }

        if hit {
            self.hunt.last_hit = Some(pos);
            self.hunt.hit_chain.push(pos);

            if self.hunt.hit_chain.len() == 1 {
                self.hunt.direction = Axis::None;
                self.hunt.targets = self.neighbours(pos, Axis::None).into();
                return;
            }

            let first = self.hunt.hit_chain[0];
            let second = self.hunt.hit_chain[1];
            self.hunt.direction = if first.row == second.row {
                Axis::Horizontal
            } else if first.col == second.col {
                Axis::Vertical
            } else {
                Axis::None
            };

            let mut targets = self.neighbours(pos, self.hunt.direction);
            if targets.is_empty() {
                targets = self.neighbours(first, self.hunt.direction);
            }
            self.hunt.targets = targets.into();
            return;
        }

        if self.hunt.direction != Axis::None && self.hunt.targets.is_empty() {
            if let Some(&first) = self.hunt.hit_chain.first() {
                self.hunt.targets = self.neighbours(first, self.hunt.direction).into();
            }
        }
    }

    /// 以结果消息形式通知
    pub fn notify(&mut self, result: ShotResult) {
        self.notify_result(result.position, result.hit, result.sunk);
    }

    fn pop_target(&mut self, tracking: &TrackingBoard) -> Option<Position> {
        while let Some(target) = self.hunt.targets.pop_front() {
            if !tracking.is_fired(target) && !self.fired.contains(&target) {
                return Some(target);
            }
        }
        None
    }

    /// 沿方向的未开火邻格
    fn neighbours(&self, pos: Position, axis: Axis) -> Vec<Position> {
        axis.steps()
            .iter()
            .filter_map(|&(d_row, d_col)| offset(pos, d_row, d_col))
            .filter(|p| !self.fired.contains(p))
            .collect()
    }

    /// 从剩余舰队中移除被击沉的船（长度未知时取最接近的）
    fn mark_sunk(&mut self, length: usize) {
        let index = self
            .remaining
            .iter()
            .position(|&l| l == length)
            .or_else(|| {
                self.remaining
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, l)| l.abs_diff(length))
                    .map(|(i, _)| i)
            });
        if let Some(index) = index {
            self.remaining.remove(index);
        }
    }

    /// 概率密度：统计每格被合法摆放覆盖的次数
    pub fn density(&self, tracking: &TrackingBoard) -> Grid<u32> {
        let mut density = Grid::new(BATTLESHIP_SIZE, BATTLESHIP_SIZE, 0u32);

        for &length in &self.remaining {
            for origin in tracking.grid().positions() {
                for (d_row, d_col) in [(0, 1), (1, 0)] {
                    let cells: Option<Vec<Position>> = (0..length as i8)
                        .map(|i| offset(origin, d_row * i, d_col * i))
                        .collect();
                    let Some(cells) = cells else { continue };
                    if cells.iter().any(|&c| tracking.get(c) == Some(Shot::Miss)) {
                        continue;
                    }
                    for cell in cells {
                        density.set(cell, density.get(cell).unwrap_or(0) + 1);
                    }
                }
            }
        }

        // 与多个命中相邻的格子也只翻倍一次
        let adjacent: HashSet<Position> = self
            .hunt
            .hit_chain
            .iter()
            .flat_map(|&hit| {
                Position::ORTHOGONAL
                    .iter()
                    .filter_map(move |&(d_row, d_col)| offset(hit, d_row, d_col))
            })
            .collect();
        for cell in adjacent {
            density.set(cell, density.get(cell).unwrap_or(0) * 2);
        }

        density
    }

    fn densest_cell<R: Rng>(
        &self,
        tracking: &TrackingBoard,
        unfired: &[Position],
        rng: &mut R,
    ) -> Option<Position> {
        let density = self.density(tracking);
        let best = unfired
            .iter()
            .filter_map(|&p| density.get(p))
            .max()
            .unwrap_or(0);
        let candidates: Vec<Position> = unfired
            .iter()
            .copied()
            .filter(|&p| density.get(p) == Some(best))
            .collect();
        candidates.choose(rng).or_else(|| unfired.choose(rng)).copied()
    }
}

impl Default for BattleshipAi {
    fn default() -> Self {
        Self::new()
    }
}

impl GameAi for BattleshipAi {
    type Board = TrackingBoard;
    type Move = Position;

    fn choose_move<R: Rng>(
        &mut self,
        board: &TrackingBoard,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<Position> {
        self.get_attack_move(board, difficulty, rng)
    }
}

fn offset(pos: Position, d_row: i8, d_col: i8) -> Option<Position> {
    let row = pos.row as i16 + d_row as i16;
    let col = pos.col as i16 + d_col as i16;
    let size = BATTLESHIP_SIZE as i16;
    if (0..size).contains(&row) && (0..size).contains(&col) {
        Some(Position::new(row as u8, col as u8))
    } else {
        None
    }
}
