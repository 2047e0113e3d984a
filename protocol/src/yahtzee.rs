//! 快艇骰子计分规则

use serde::{Deserialize, Serialize};

use crate::constants::{CATEGORY_COUNT, DICE_COUNT, UPPER_BONUS, UPPER_BONUS_THRESHOLD};

/// 五颗骰子
pub type Dice = [u8; DICE_COUNT];

/// 计分项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

impl Category {
    /// 全部计分项（上半区在前）
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// 在计分表中的下标
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// 上半区对应的点数
    pub fn face(&self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    pub fn is_upper(&self) -> bool {
        self.face().is_some()
    }

    /// 计算该计分项在给定骰子下的得分
    pub fn score(&self, dice: &Dice) -> u32 {
        let counts = face_counts(dice);
        let total: u32 = dice.iter().map(|&d| d as u32).sum();
        let has = |face: usize| counts[face] > 0;

        match self {
            Category::ThreeOfAKind if counts.iter().any(|&c| c >= 3) => total,
            Category::FourOfAKind if counts.iter().any(|&c| c >= 4) => total,
            Category::FullHouse
                if counts.iter().any(|&c| c == 3) && counts.iter().any(|&c| c == 2) =>
            {
                25
            }
            Category::SmallStraight
                if (1..=3).any(|start| (start..start + 4).all(has)) =>
            {
                30
            }
            Category::LargeStraight if (1..=2).any(|start| (start..start + 5).all(has)) => 40,
            Category::Yahtzee if counts.iter().any(|&c| c == DICE_COUNT as u8) => 50,
            Category::Chance => total,
            upper if upper.is_upper() => {
                let face = upper.face().unwrap_or(0);
                counts[face as usize] as u32 * face as u32
            }
            _ => 0,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 每个点数出现的次数，下标 1-6
fn face_counts(dice: &Dice) -> [u8; 7] {
    let mut counts = [0u8; 7];
    for &d in dice {
        if (1..=6).contains(&d) {
            counts[d as usize] += 1;
        }
    }
    counts
}

/// 计分表（每项锁定后不可更改）
pub type Scorecard = [Option<u32>; CATEGORY_COUNT];

/// 上半区合计
pub fn upper_total(card: &Scorecard) -> u32 {
    Category::ALL
        .iter()
        .filter(|c| c.is_upper())
        .filter_map(|c| card[c.index()])
        .sum()
}

/// 上半区奖励
pub fn upper_bonus(card: &Scorecard) -> u32 {
    if upper_total(card) >= UPPER_BONUS_THRESHOLD {
        UPPER_BONUS
    } else {
        0
    }
}

/// 总分 = 已锁定项之和 + 上半区奖励
pub fn total_score(card: &Scorecard) -> u32 {
    card.iter().flatten().sum::<u32>() + upper_bonus(card)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yahtzee_scores_fifty() {
        let dice = [5, 5, 5, 5, 5];
        assert_eq!(Category::Yahtzee.score(&dice), 50);
        assert_eq!(Category::FullHouse.score(&dice), 0);
        assert_eq!(Category::Fives.score(&dice), 25);
        assert_eq!(Category::FourOfAKind.score(&dice), 25);
    }

    #[test]
    fn test_upper_categories() {
        let dice = [1, 3, 3, 6, 3];
        assert_eq!(Category::Ones.score(&dice), 1);
        assert_eq!(Category::Threes.score(&dice), 9);
        assert_eq!(Category::Sixes.score(&dice), 6);
        assert_eq!(Category::Twos.score(&dice), 0);
    }

    #[test]
    fn test_of_a_kind() {
        let dice = [4, 4, 4, 2, 1];
        assert_eq!(Category::ThreeOfAKind.score(&dice), 15);
        assert_eq!(Category::FourOfAKind.score(&dice), 0);
        assert_eq!(Category::Chance.score(&dice), 15);
    }

    #[test]
    fn test_full_house() {
        assert_eq!(Category::FullHouse.score(&[2, 3, 2, 3, 2]), 25);
        assert_eq!(Category::FullHouse.score(&[2, 2, 2, 2, 3]), 0);
    }

    #[test]
    fn test_straights() {
        assert_eq!(Category::SmallStraight.score(&[1, 2, 3, 4, 6]), 30);
        assert_eq!(Category::SmallStraight.score(&[3, 4, 5, 6, 6]), 30);
        assert_eq!(Category::SmallStraight.score(&[1, 2, 3, 5, 6]), 0);

        assert_eq!(Category::LargeStraight.score(&[5, 4, 3, 2, 1]), 40);
        assert_eq!(Category::LargeStraight.score(&[2, 3, 4, 5, 6]), 40);
        assert_eq!(Category::LargeStraight.score(&[1, 2, 3, 4, 6]), 0);
        assert_eq!(Category::SmallStraight.score(&[2, 3, 4, 5, 6]), 30);
    }

    #[test]
    fn test_upper_bonus() {
        let mut card: Scorecard = [None; CATEGORY_COUNT];
        for category in Category::ALL.iter().filter(|c| c.is_upper()) {
            let face = category.face().unwrap();
            card[category.index()] = Some(face as u32 * 3);
        }
        assert_eq!(upper_total(&card), 63);
        assert_eq!(upper_bonus(&card), 35);
        assert_eq!(total_score(&card), 98);

        card[Category::Ones.index()] = Some(2);
        assert_eq!(upper_bonus(&card), 0);
        card[Category::Chance.index()] = Some(20);
        assert_eq!(total_score(&card), 82);
    }

    #[test]
    fn test_category_index_matches_all() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}
