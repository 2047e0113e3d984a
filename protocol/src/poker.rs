//! 扑克牌型评估
//!
//! 支持:
//! - 五张牌的牌型与比较序列
//! - 百搭牌（1-2 张穷举替换，3 张公式推导，4 张以上必为五条）
//! - 多于五张时从所有五张组合中取最优（梭哈）
//! - 多人比牌（平分底池）

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck, WildRule, ACE};
use crate::constants::HAND_SIZE;
use crate::error::GameError;
use crate::message::PlayerId;

/// 牌型（由低到高）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandRank {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
    /// 只有百搭牌才可能出现
    FiveOfAKind = 10,
}

impl HandRank {
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

/// 评估结果：先比牌型，再逐项比较 tiebreakers
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandResult {
    pub rank: HandRank,
    /// 高位在前
    pub tiebreakers: Vec<u8>,
}

impl HandResult {
    fn new(rank: HandRank, tiebreakers: Vec<u8>) -> Self {
        Self { rank, tiebreakers }
    }
}

/// 评估恰好五张牌（所有牌按牌面计算，不考虑百搭）
pub fn evaluate_hand(cards: &[Card]) -> Result<HandResult, GameError> {
    check_hand_size(cards)?;
    Ok(evaluate_five(cards))
}

/// 评估恰好五张牌，按规则处理百搭牌
pub fn evaluate_hand_with_wilds(
    cards: &[Card],
    rules: &[WildRule],
) -> Result<HandResult, GameError> {
    check_hand_size(cards)?;

    let (wilds, naturals): (Vec<Card>, Vec<Card>) =
        cards.iter().copied().partition(|card| card.is_wild(rules));

    let result = match wilds.len() {
        0 => evaluate_five(cards),
        1 | 2 => {
            let deck = Deck::standard();
            let mut hand = naturals;
            let mut best = None;
            substitute(&mut hand, wilds.len(), deck.cards(), &mut best);
            // 至少有一种替换，best 必然有值
            best.unwrap_or_else(|| evaluate_five(cards))
        }
        3 => three_wild_shortcut(naturals[0], naturals[1]),
        _ => {
            let value = naturals.first().map(|card| card.value).unwrap_or(ACE);
            HandResult::new(HandRank::FiveOfAKind, vec![value])
        }
    };
    Ok(result)
}

/// 从五张以上的牌中选出最优的五张
pub fn evaluate_best_hand(cards: &[Card]) -> Result<HandResult, GameError> {
    best_of_subsets(cards, evaluate_hand)
}

/// 从五张以上的牌中选出最优的五张（含百搭）
pub fn evaluate_best_hand_with_wilds(
    cards: &[Card],
    rules: &[WildRule],
) -> Result<HandResult, GameError> {
    best_of_subsets(cards, |hand| evaluate_hand_with_wilds(hand, rules))
}

/// 找出所有并列最优的玩家
pub fn determine_winners(
    hands: &[(PlayerId, Vec<Card>)],
    rules: &[WildRule],
) -> Result<Vec<PlayerId>, GameError> {
    let results = hands
        .iter()
        .map(|(id, cards)| Ok((*id, evaluate_best_hand_with_wilds(cards, rules)?)))
        .collect::<Result<Vec<_>, GameError>>()?;

    let Some(best) = results.iter().map(|(_, result)| result).max() else {
        return Ok(Vec::new());
    };

    Ok(results
        .iter()
        .filter(|(_, result)| result == best)
        .map(|(id, _)| *id)
        .collect())
}

fn check_hand_size(cards: &[Card]) -> Result<(), GameError> {
    if cards.len() != HAND_SIZE {
        return Err(GameError::InvalidHandSize {
            expected: HAND_SIZE,
            actual: cards.len(),
        });
    }
    Ok(())
}

fn best_of_subsets<F>(cards: &[Card], evaluate: F) -> Result<HandResult, GameError>
where
    F: Fn(&[Card]) -> Result<HandResult, GameError>,
{
    if cards.len() < HAND_SIZE {
        return Err(GameError::InvalidHandSize {
            expected: HAND_SIZE,
            actual: cards.len(),
        });
    }

    let mut best: Option<HandResult> = None;
    for indices in combinations(cards.len(), HAND_SIZE) {
        let hand: Vec<Card> = indices.iter().map(|&i| cards[i]).collect();
        let result = evaluate(&hand)?;
        if best.as_ref().map_or(true, |b| result > *b) {
            best = Some(result);
        }
    }
    // cards.len() >= HAND_SIZE 时至少有一个组合
    best.ok_or(GameError::InvalidHandSize {
        expected: HAND_SIZE,
        actual: cards.len(),
    })
}

/// n 选 k 的所有下标组合（字典序）
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn extend(start: usize, n: usize, k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            extend(i + 1, n, k, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    extend(0, n, k, &mut Vec::with_capacity(k), &mut out);
    out
}

/// 用整副牌逐一替换百搭牌，保留最优结果
fn substitute(hand: &mut Vec<Card>, wilds: usize, deck: &[Card], best: &mut Option<HandResult>) {
    if wilds == 0 {
        let result = evaluate_five(hand);
        if best.as_ref().map_or(true, |b| result > *b) {
            *best = Some(result);
        }
        return;
    }
    for &card in deck {
        hand.push(card);
        substitute(hand, wilds - 1, deck, best);
        hand.pop();
    }
}

/// 三张百搭 + 两张自然牌
fn three_wild_shortcut(a: Card, b: Card) -> HandResult {
    if a.value == b.value {
        return HandResult::new(HandRank::FiveOfAKind, vec![a.value]);
    }

    if a.suit == b.suit {
        let top = (5..=ACE)
            .rev()
            .find(|&high| in_straight_window(a.value, high) && in_straight_window(b.value, high));
        if let Some(high) = top {
            return if high == ACE {
                HandResult::new(HandRank::RoyalFlush, vec![ACE])
            } else {
                HandResult::new(HandRank::StraightFlush, vec![high])
            };
        }
    }

    let (high, low) = if a.value > b.value {
        (a.value, b.value)
    } else {
        (b.value, a.value)
    };
    HandResult::new(HandRank::FourOfAKind, vec![high, low])
}

/// 点数是否落在以 high 为顶的顺子内（A 在 5 顶顺子中当 1）
fn in_straight_window(value: u8, high: u8) -> bool {
    (value <= high && value + 4 >= high) || (high == 5 && value == ACE)
}

fn evaluate_five(cards: &[Card]) -> HandResult {
    let mut values: Vec<u8> = cards.iter().map(|card| card.value).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.windows(2).all(|w| w[0].suit == w[1].suit);
    let straight_high = straight_high(&values);

    // (张数, 点数)，张数多的在前，同张数点数大的在前
    let mut groups: Vec<(usize, u8)> = Vec::new();
    for &value in &values {
        match groups.iter_mut().find(|(_, v)| *v == value) {
            Some((count, _)) => *count += 1,
            None => groups.push((1, value)),
        }
    }
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let counts: Vec<usize> = groups.iter().map(|(count, _)| *count).collect();
    let ranked: Vec<u8> = groups.iter().map(|(_, value)| *value).collect();

    match (counts.as_slice(), straight_high, is_flush) {
        ([5], _, _) => HandResult::new(HandRank::FiveOfAKind, vec![ranked[0]]),
        (_, Some(ACE), true) => HandResult::new(HandRank::RoyalFlush, vec![ACE]),
        (_, Some(high), true) => HandResult::new(HandRank::StraightFlush, vec![high]),
        ([4, 1], _, _) => HandResult::new(HandRank::FourOfAKind, ranked),
        ([3, 2], _, _) => HandResult::new(HandRank::FullHouse, ranked),
        (_, _, true) => HandResult::new(HandRank::Flush, values),
        (_, Some(high), false) => HandResult::new(HandRank::Straight, vec![high]),
        ([3, 1, 1], _, _) => HandResult::new(HandRank::ThreeOfAKind, ranked),
        ([2, 2, 1], _, _) => HandResult::new(HandRank::TwoPair, ranked),
        ([2, 1, 1, 1], _, _) => HandResult::new(HandRank::Pair, ranked),
        _ => HandResult::new(HandRank::HighCard, values),
    }
}

/// 顺子最高点，A-2-3-4-5 记为 5
fn straight_high(sorted_desc: &[u8]) -> Option<u8> {
    let distinct = sorted_desc.windows(2).all(|w| w[0] != w[1]);
    if !distinct || sorted_desc.len() != HAND_SIZE {
        return None;
    }
    if sorted_desc[0] - sorted_desc[HAND_SIZE - 1] == 4 {
        return Some(sorted_desc[0]);
    }
    if sorted_desc == [ACE, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}
