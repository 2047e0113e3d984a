//! 协议常量定义

/// 四子棋行数
pub const CONNECT_FOUR_ROWS: usize = 6;

/// 四子棋列数
pub const CONNECT_FOUR_COLS: usize = 7;

/// 连成一线所需棋子数
pub const CONNECT_LENGTH: usize = 4;

/// 四子棋中心优先的列顺序（用于中等难度与走法排序）
pub const CENTER_ORDER: [usize; CONNECT_FOUR_COLS] = [3, 2, 4, 1, 5, 0, 6];

/// 四子棋困难难度搜索深度
pub const CONNECT_FOUR_SEARCH_DEPTH: u8 = 7;

/// 海战棋盘边长
pub const BATTLESHIP_SIZE: usize = 10;

/// 舰队中每艘船的长度
pub const FLEET_LENGTHS: [usize; 5] = [5, 4, 3, 3, 2];

/// 单艘船的最大放置尝试次数
pub const MAX_SHIP_ATTEMPTS: usize = 100;

/// 整个舰队的最大重新放置次数
pub const MAX_FLEET_ATTEMPTS: usize = 100;

/// 骰子数量
pub const DICE_COUNT: usize = 5;

/// 每回合可掷骰次数
pub const ROLLS_PER_TURN: u8 = 3;

/// 计分项数量
pub const CATEGORY_COUNT: usize = 13;

/// 上半区奖励门槛
pub const UPPER_BONUS_THRESHOLD: u32 = 63;

/// 上半区奖励分
pub const UPPER_BONUS: u32 = 35;

/// 一手牌的张数
pub const HAND_SIZE: usize = 5;

/// AI 玩家 ID（使用最大值避免与真实玩家 ID 冲突）
pub const AI_PLAYER_ID: u64 = u64::MAX;
