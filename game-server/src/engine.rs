//! 回合制游戏引擎约定
//!
//! 每个引擎持有一局的权威状态：先完整校验走法，再写入状态

use protocol::{GameError, GameKind, GameMove, MoveResponse, PlayerId};
use serde::Serialize;
use tracing::warn;

/// 服务端持有的回合制游戏
pub trait TurnBasedGame {
    /// 该游戏的走法
    type Move;
    /// 走法被接受后返回给提交者的结果
    type Outcome: Serialize;
    /// 可广播的状态快照
    type Snapshot: Serialize;

    fn kind(&self) -> GameKind;

    /// 从通用走法中取出本游戏的走法
    fn decode(mv: GameMove) -> Result<Self::Move, GameError>;

    /// 当前应走棋的玩家，游戏结束时为 None
    fn current_player(&self) -> Option<PlayerId>;

    /// 校验并执行走法，被拒绝时状态不变
    fn make_move(&mut self, player: PlayerId, mv: Self::Move) -> Result<Self::Outcome, GameError>;

    /// 状态快照（`viewer` 为观察者，None 表示旁观）
    fn state(&self, viewer: Option<PlayerId>) -> Self::Snapshot;

    fn remove_player(&mut self, player: PlayerId) -> Result<(), GameError>;

    fn is_over(&self) -> bool;

    fn winner(&self) -> Option<PlayerId>;

    /// 同一批玩家重新开局
    fn reset(&mut self);

    /// 执行走法并包装为应答
    fn submit(&mut self, player: PlayerId, mv: Self::Move) -> MoveResponse<Self::Outcome> {
        let result = self.make_move(player, mv);
        if let Err(err) = &result {
            warn!(game = ?self.kind(), player, %err, "走法被拒绝");
        }
        result.into()
    }
}
