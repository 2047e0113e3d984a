//! 扑克牌定义

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 花色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
    /// 大小王没有花色
    Joker,
}

impl Suit {
    /// 四种常规花色
    pub const STANDARD: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Joker => '★',
        }
    }
}

/// 点数常量 (2-14, 其中 11=J, 12=Q, 13=K, 14=A)
pub const JACK: u8 = 11;
pub const QUEEN: u8 = 12;
pub const KING: u8 = 13;
pub const ACE: u8 = 14;

/// 一张牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    /// 2-14；王牌为 0
    pub value: u8,
}

impl Card {
    pub const fn new(value: u8, suit: Suit) -> Self {
        Self { suit, value }
    }

    /// 王牌
    pub const fn joker() -> Self {
        Self {
            suit: Suit::Joker,
            value: 0,
        }
    }

    pub fn is_joker(&self) -> bool {
        self.suit == Suit::Joker
    }

    /// 是否在给定规则下为百搭牌（王牌永远是百搭）
    pub fn is_wild(&self, rules: &[WildRule]) -> bool {
        self.is_joker() || rules.iter().any(|rule| rule.matches(self))
    }

    /// 从 "AS"、"10H"、"2c" 之类的写法解析
    pub fn parse(text: &str) -> Option<Card> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("joker") {
            return Some(Card::joker());
        }
        let (last, _) = text.char_indices().last()?;
        let (rank, suit) = text.split_at(last);
        let suit = match suit.to_ascii_uppercase().as_str() {
            "S" => Suit::Spades,
            "H" => Suit::Hearts,
            "D" => Suit::Diamonds,
            "C" => Suit::Clubs,
            _ => return None,
        };
        let value = match rank.to_ascii_uppercase().as_str() {
            "J" => JACK,
            "Q" => QUEEN,
            "K" => KING,
            "A" => ACE,
            "T" => 10,
            digits => digits.parse().ok().filter(|v| (2..=10).contains(v))?,
        };
        Some(Card::new(value, suit))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_joker() {
            return write!(f, "Joker");
        }
        let rank = match self.value {
            JACK => "J".to_string(),
            QUEEN => "Q".to_string(),
            KING => "K".to_string(),
            ACE => "A".to_string(),
            v => v.to_string(),
        };
        write!(f, "{}{}", rank, self.suit.symbol())
    }
}

/// 百搭规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildRule {
    /// 独眼 J：黑桃 J 与红桃 J
    OneEyedJacks,
    /// 自杀 K：红桃 K
    SuicideKing,
    /// 所有的 2
    Deuces,
    /// 指定点数
    Rank(u8),
}

impl WildRule {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            WildRule::OneEyedJacks => {
                card.value == JACK && matches!(card.suit, Suit::Spades | Suit::Hearts)
            }
            WildRule::SuicideKing => card.value == KING && card.suit == Suit::Hearts,
            WildRule::Deuces => card.value == 2 && !card.is_joker(),
            WildRule::Rank(value) => card.value == *value && !card.is_joker(),
        }
    }
}

/// 牌堆
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// 标准 52 张（按花色、点数排列，未洗牌）
    pub fn standard() -> Self {
        let cards = Suit::STANDARD
            .iter()
            .flat_map(|&suit| (2..=ACE).map(move |value| Card::new(value, suit)))
            .collect();
        Self { cards }
    }

    /// 标准 52 张外加若干王牌
    pub fn with_jokers(jokers: usize) -> Self {
        let mut deck = Self::standard();
        deck.cards
            .extend(std::iter::repeat(Card::joker()).take(jokers));
        deck
    }

    /// 洗牌
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// 从顶部发牌，不足时发出剩余的全部
    pub fn deal(&mut self, count: usize) -> Vec<Card> {
        let split = self.cards.len().saturating_sub(count);
        let mut dealt = self.cards.split_off(split);
        dealt.reverse();
        dealt
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_standard_deck() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), 52);
        let unique: HashSet<_> = deck.cards().iter().collect();
        assert_eq!(unique.len(), 52);
        assert!(!deck.cards().iter().any(Card::is_joker));
    }

    #[test]
    fn test_deal_and_shuffle() {
        let mut deck = Deck::with_jokers(2);
        assert_eq!(deck.len(), 54);

        deck.shuffle(&mut ChaCha8Rng::seed_from_u64(3));
        let hand = deck.deal(7);
        assert_eq!(hand.len(), 7);
        assert_eq!(deck.len(), 47);

        let rest = deck.deal(100);
        assert_eq!(rest.len(), 47);
        assert!(deck.is_empty());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Card::parse("AS"), Some(Card::new(ACE, Suit::Spades)));
        assert_eq!(Card::parse("10h"), Some(Card::new(10, Suit::Hearts)));
        assert_eq!(Card::parse("2C"), Some(Card::new(2, Suit::Clubs)));
        assert_eq!(Card::parse("joker"), Some(Card::joker()));
        assert_eq!(Card::parse("1S"), None);
        assert_eq!(Card::parse("AX"), None);
        assert_eq!(Card::parse(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(ACE, Suit::Spades).to_string(), "A♠");
        assert_eq!(Card::new(10, Suit::Diamonds).to_string(), "10♦");
    }

    #[test]
    fn test_wild_rules() {
        let one_eyed = [WildRule::OneEyedJacks];
        assert!(Card::new(JACK, Suit::Spades).is_wild(&one_eyed));
        assert!(Card::new(JACK, Suit::Hearts).is_wild(&one_eyed));
        assert!(!Card::new(JACK, Suit::Clubs).is_wild(&one_eyed));

        let suicide = [WildRule::SuicideKing];
        assert!(Card::new(KING, Suit::Hearts).is_wild(&suicide));
        assert!(!Card::new(KING, Suit::Spades).is_wild(&suicide));

        let deuces = [WildRule::Deuces];
        assert!(Card::new(2, Suit::Diamonds).is_wild(&deuces));
        assert!(!Card::new(3, Suit::Diamonds).is_wild(&deuces));

        let sevens = [WildRule::Rank(7)];
        assert!(Card::new(7, Suit::Clubs).is_wild(&sevens));

        assert!(Card::joker().is_wild(&[]));
        assert!(!Card::new(ACE, Suit::Spades).is_wild(&[]));
    }
}
