//! 海战棋规则
//!
//! 包含舰队定义、随机布阵以及攻击方的追踪棋盘

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::{Grid, Position};
use crate::constants::{
    BATTLESHIP_SIZE, FLEET_LENGTHS, MAX_FLEET_ATTEMPTS, MAX_SHIP_ATTEMPTS,
};
use crate::error::GameError;

/// 舰船类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ship {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl Ship {
    /// 完整舰队（与 FLEET_LENGTHS 一一对应）
    pub const FLEET: [Ship; 5] = [
        Ship::Carrier,
        Ship::Battleship,
        Ship::Cruiser,
        Ship::Submarine,
        Ship::Destroyer,
    ];

    /// 舰船长度
    pub fn length(&self) -> usize {
        match self {
            Ship::Carrier => FLEET_LENGTHS[0],
            Ship::Battleship => FLEET_LENGTHS[1],
            Ship::Cruiser => FLEET_LENGTHS[2],
            Ship::Submarine => FLEET_LENGTHS[3],
            Ship::Destroyer => FLEET_LENGTHS[4],
        }
    }
}

/// 摆放方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// 沿该方向前进一格的偏移
    pub fn step(&self) -> (i8, i8) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// 一艘船的摆放
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipPlacement {
    pub ship: Ship,
    /// 船首位置（最上/最左的格子）
    pub origin: Position,
    pub orientation: Orientation,
}

impl ShipPlacement {
    /// 占据的所有格子
    pub fn cells(&self) -> Vec<Position> {
        let (d_row, d_col) = self.orientation.step();
        (0..self.ship.length())
            .map(|i| {
                Position::new(
                    self.origin.row + d_row as u8 * i as u8,
                    self.origin.col + d_col as u8 * i as u8,
                )
            })
            .collect()
    }

    /// 是否完全位于棋盘内
    pub fn in_bounds(&self) -> bool {
        self.cells().iter().all(|p| {
            (p.row as usize) < BATTLESHIP_SIZE && (p.col as usize) < BATTLESHIP_SIZE
        })
    }
}

/// 随机生成整支舰队的摆放
///
/// 每艘船最多尝试 MAX_SHIP_ATTEMPTS 次；某艘船放不下时整支舰队从头开始，
/// 最多重来 MAX_FLEET_ATTEMPTS 次，仍失败则返回错误。
pub fn generate_ship_placements<R: Rng>(rng: &mut R) -> Result<Vec<ShipPlacement>, GameError> {
    for attempt in 1..=MAX_FLEET_ATTEMPTS {
        if let Some(fleet) = try_place_fleet(rng) {
            return Ok(fleet);
        }
        warn!(attempt, "舰队放置失败，重新开始");
    }
    Err(GameError::PlacementExhausted(MAX_FLEET_ATTEMPTS))
}

fn try_place_fleet<R: Rng>(rng: &mut R) -> Option<Vec<ShipPlacement>> {
    let mut occupied = Grid::new(BATTLESHIP_SIZE, BATTLESHIP_SIZE, false);
    let mut fleet = Vec::with_capacity(Ship::FLEET.len());

    for ship in Ship::FLEET {
        let placement = (0..MAX_SHIP_ATTEMPTS).find_map(|_| {
            let orientation = if rng.gen_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let span = BATTLESHIP_SIZE - ship.length() + 1;
            let (max_row, max_col) = match orientation {
                Orientation::Horizontal => (BATTLESHIP_SIZE, span),
                Orientation::Vertical => (span, BATTLESHIP_SIZE),
            };
            let candidate = ShipPlacement {
                ship,
                origin: Position::new(
                    rng.gen_range(0..max_row) as u8,
                    rng.gen_range(0..max_col) as u8,
                ),
                orientation,
            };
            let free = candidate
                .cells()
                .iter()
                .all(|&p| occupied.get(p) == Some(false));
            free.then_some(candidate)
        })?;

        for cell in placement.cells() {
            occupied.set(cell, true);
        }
        fleet.push(placement);
    }

    Some(fleet)
}

/// 攻击方视角下的格子状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shot {
    /// 未开火
    Unknown,
    /// 未命中
    Miss,
    /// 命中
    Hit,
}

/// 攻击方的追踪棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingBoard {
    grid: Grid<Shot>,
}

impl TrackingBoard {
    /// 创建 10x10 空追踪棋盘
    pub fn new() -> Self {
        Self {
            grid: Grid::new(BATTLESHIP_SIZE, BATTLESHIP_SIZE, Shot::Unknown),
        }
    }

    /// 记录一次开火结果
    pub fn record(&mut self, pos: Position, hit: bool) {
        self.grid.set(pos, if hit { Shot::Hit } else { Shot::Miss });
    }

    /// 获取格子状态
    pub fn get(&self, pos: Position) -> Option<Shot> {
        self.grid.get(pos)
    }

    /// 是否已对该格开火（越界视为已开火）
    pub fn is_fired(&self, pos: Position) -> bool {
        !matches!(self.grid.get(pos), Some(Shot::Unknown))
    }

    /// 所有未开火的格子（行优先）
    pub fn unfired_cells(&self) -> Vec<Position> {
        self.grid
            .iter()
            .filter(|(_, shot)| *shot == Shot::Unknown)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// 底层网格
    pub fn grid(&self) -> &Grid<Shot> {
        &self.grid
    }
}

impl Default for TrackingBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_placement_cells() {
        let placement = ShipPlacement {
            ship: Ship::Cruiser,
            origin: Position::new(2, 7),
            orientation: Orientation::Horizontal,
        };
        assert_eq!(
            placement.cells(),
            vec![Position::new(2, 7), Position::new(2, 8), Position::new(2, 9)]
        );
        assert!(placement.in_bounds());

        let overflow = ShipPlacement {
            ship: Ship::Carrier,
            origin: Position::new(6, 0),
            orientation: Orientation::Vertical,
        };
        assert!(!overflow.in_bounds());
    }

    #[test]
    fn test_generate_fleet_valid() {
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let fleet = generate_ship_placements(&mut rng).unwrap();

            assert_eq!(fleet.len(), Ship::FLEET.len());
            let ships: Vec<_> = fleet.iter().map(|p| p.ship).collect();
            assert_eq!(ships, Ship::FLEET.to_vec());

            let mut seen = HashSet::new();
            for placement in &fleet {
                assert!(placement.in_bounds(), "seed {seed}: {placement:?}");
                for cell in placement.cells() {
                    assert!(seen.insert(cell), "seed {seed}: overlap at {cell}");
                }
            }
            assert_eq!(seen.len(), FLEET_LENGTHS.iter().sum::<usize>());
        }
    }

    #[test]
    fn test_generate_fleet_reproducible() {
        let a = generate_ship_placements(&mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let b = generate_ship_placements(&mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tracking_board() {
        let mut board = TrackingBoard::new();
        assert_eq!(board.unfired_cells().len(), BATTLESHIP_SIZE * BATTLESHIP_SIZE);

        board.record(Position::new(0, 0), true);
        board.record(Position::new(0, 1), false);

        assert_eq!(board.get(Position::new(0, 0)), Some(Shot::Hit));
        assert_eq!(board.get(Position::new(0, 1)), Some(Shot::Miss));
        assert!(board.is_fired(Position::new(0, 0)));
        assert!(!board.is_fired(Position::new(5, 5)));
        assert!(board.is_fired(Position::new(10, 0)));
        assert_eq!(board.unfired_cells().len(), BATTLESHIP_SIZE * BATTLESHIP_SIZE - 2);
    }
}
