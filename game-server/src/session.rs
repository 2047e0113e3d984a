//! 对局会话
//!
//! 每个活动对局由一个 tokio 任务独占持有引擎（以及可选的 AI 座位），
//! 走法通过 mpsc 通道串行送达，应答经 oneshot 返回。

use game_ai::{ConnectFourAi, GameAi};
use protocol::{
    ConnectFourMove, Difficulty, GameError, GameMove, MoveResponse, PlayerId, ProtocolError,
    SessionId,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::connect_four::ConnectFourEngine;
use crate::engine::TurnBasedGame;

/// 由 AI 控制的座位
pub trait AiSeat<G: TurnBasedGame>: Send {
    fn player(&self) -> PlayerId;

    fn choose(&mut self, game: &G, rng: &mut ChaCha8Rng) -> Option<G::Move>;
}

/// 四子棋 AI 座位
pub struct ConnectFourSeat {
    player: PlayerId,
    difficulty: Difficulty,
    ai: ConnectFourAi,
}

impl ConnectFourSeat {
    /// `engine` 用于确定该座位执的棋子
    pub fn new(
        engine: &ConnectFourEngine,
        player: PlayerId,
        difficulty: Difficulty,
    ) -> Result<Self, GameError> {
        let disc = engine
            .disc_of(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        Ok(Self {
            player,
            difficulty,
            ai: ConnectFourAi::new(disc),
        })
    }
}

impl AiSeat<ConnectFourEngine> for ConnectFourSeat {
    fn player(&self) -> PlayerId {
        self.player
    }

    fn choose(&mut self, game: &ConnectFourEngine, rng: &mut ChaCha8Rng) -> Option<ConnectFourMove> {
        self.ai
            .choose_move(game.board(), self.difficulty, rng)
            .map(|column| ConnectFourMove { column })
    }
}

type Reply<T> = oneshot::Sender<T>;

enum Command<G: TurnBasedGame> {
    Move {
        player: PlayerId,
        mv: G::Move,
        reply: Reply<MoveResponse<G::Outcome>>,
    },
    State {
        viewer: Option<PlayerId>,
        reply: Reply<G::Snapshot>,
    },
    Leave {
        player: PlayerId,
        reply: Reply<Result<(), GameError>>,
    },
    Reset {
        reply: Reply<()>,
    },
}

/// 对局句柄，可克隆；全部句柄释放后任务退出
pub struct SessionHandle<G: TurnBasedGame> {
    id: SessionId,
    tx: mpsc::Sender<Command<G>>,
}

impl<G: TurnBasedGame> Clone for SessionHandle<G> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            tx: self.tx.clone(),
        }
    }
}

impl<G> SessionHandle<G>
where
    G: TurnBasedGame + Send + 'static,
    G::Move: Send + 'static,
    G::Outcome: Send + 'static,
    G::Snapshot: Send + 'static,
{
    /// 启动对局任务
    pub fn spawn(
        id: SessionId,
        engine: G,
        seats: Vec<Box<dyn AiSeat<G>>>,
        config: &ServerConfig,
    ) -> Self {
        let (tx, rx) = mpsc::channel(config.session_queue_depth.max(1));
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed ^ id),
            None => ChaCha8Rng::from_entropy(),
        };
        let session = Session {
            id,
            engine,
            seats,
            rng,
        };
        tokio::spawn(session.run(rx));
        Self { id, tx }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Reply<T>) -> Command<G>,
    ) -> protocol::Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| ProtocolError::SessionClosed)?;
        rx.await.map_err(|_| ProtocolError::SessionClosed)
    }

    /// 提交走法
    pub async fn submit(
        &self,
        player: PlayerId,
        mv: G::Move,
    ) -> protocol::Result<MoveResponse<G::Outcome>> {
        self.request(|reply| Command::Move { player, mv, reply })
            .await
    }

    /// 提交 JSON 走法，无法解析时直接拒绝
    pub async fn submit_json(
        &self,
        player: PlayerId,
        json: &str,
    ) -> protocol::Result<MoveResponse<G::Outcome>> {
        let mv = match GameMove::from_json(json) {
            Ok(mv) => mv,
            Err(err) => {
                warn!(session = self.id, player, %err, "无法解析走法");
                return Ok(MoveResponse::rejected(err.to_string()));
            }
        };
        match G::decode(mv) {
            Ok(mv) => self.submit(player, mv).await,
            Err(err) => {
                warn!(session = self.id, player, %err, "走法与游戏不匹配");
                Ok(MoveResponse::rejected(err.to_string()))
            }
        }
    }

    pub async fn state(&self, viewer: Option<PlayerId>) -> protocol::Result<G::Snapshot> {
        self.request(|reply| Command::State { viewer, reply }).await
    }

    pub async fn remove_player(&self, player: PlayerId) -> protocol::Result<()> {
        self.request(|reply| Command::Leave { player, reply })
            .await?
            .map_err(ProtocolError::from)
    }

    pub async fn reset(&self) -> protocol::Result<()> {
        self.request(|reply| Command::Reset { reply }).await
    }
}

struct Session<G: TurnBasedGame> {
    id: SessionId,
    engine: G,
    seats: Vec<Box<dyn AiSeat<G>>>,
    rng: ChaCha8Rng,
}

impl<G: TurnBasedGame> Session<G> {
    async fn run(mut self, mut rx: mpsc::Receiver<Command<G>>) {
        info!(session = self.id, game = ?self.engine.kind(), "对局开始");
        self.play_ai_turns();

        while let Some(command) = rx.recv().await {
            match command {
                Command::Move { player, mv, reply } => {
                    let response = self.engine.submit(player, mv);
                    if response.valid {
                        self.play_ai_turns();
                    }
                    let _ = reply.send(response);
                }
                Command::State { viewer, reply } => {
                    let _ = reply.send(self.engine.state(viewer));
                }
                Command::Leave { player, reply } => {
                    self.seats.retain(|seat| seat.player() != player);
                    let result = self.engine.remove_player(player);
                    if result.is_ok() {
                        self.play_ai_turns();
                    }
                    let _ = reply.send(result);
                }
                Command::Reset { reply } => {
                    self.engine.reset();
                    self.play_ai_turns();
                    let _ = reply.send(());
                }
            }
        }

        info!(session = self.id, winner = ?self.engine.winner(), "对局关闭");
    }

    /// 轮到 AI 座位时连续替其走棋
    fn play_ai_turns(&mut self) {
        while let Some(current) = self.engine.current_player() {
            let Some(seat) = self.seats.iter_mut().find(|seat| seat.player() == current) else {
                break;
            };
            // 搜索在阻塞线程中执行，不占用其他对局的异步任务
            let engine = &self.engine;
            let rng = &mut self.rng;
            let Some(mv) = tokio::task::block_in_place(|| seat.choose(engine, rng)) else {
                break;
            };
            let response = self.engine.submit(current, mv);
            if !response.valid {
                warn!(session = self.id, player = current, "AI 走法被拒绝");
                break;
            }
            debug!(session = self.id, player = current, "AI 已走棋");
        }
    }
}
