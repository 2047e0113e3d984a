use anyhow::Result;
use game_server::{
    AiSeat, ConnectFourEngine, ConnectFourSeat, ServerConfig, SessionHandle, YahtzeeEngine,
};
use protocol::yahtzee::Category;
use protocol::{Difficulty, GameMove, PlayerId, YahtzeeMove, AI_PLAYER_ID};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(config.log_filter.parse()?))
        .init();

    info!(?config, "棋牌游戏服务端启动中...");

    run_connect_four(&config).await?;
    run_yahtzee(&config).await?;

    Ok(())
}

/// AI 对 AI 的四子棋对局
async fn run_connect_four(config: &ServerConfig) -> Result<()> {
    const CHALLENGER: PlayerId = 1;

    let engine = ConnectFourEngine::new(CHALLENGER, AI_PLAYER_ID);
    let seats: Vec<Box<dyn AiSeat<ConnectFourEngine>>> = vec![
        Box::new(ConnectFourSeat::new(&engine, CHALLENGER, config.default_difficulty)?),
        Box::new(ConnectFourSeat::new(&engine, AI_PLAYER_ID, Difficulty::Hard)?),
    ];
    let handle = SessionHandle::spawn(1, engine, seats, config);

    let state = handle.state(None).await?;
    info!(
        moves = ?state.moves,
        winner = ?state.winner,
        "四子棋演示结束"
    );
    Ok(())
}

/// 两名玩家经 JSON 走法完成一局快艇骰子：每回合掷一次，锁定得分最高的计分项
async fn run_yahtzee(config: &ServerConfig) -> Result<()> {
    let players: [PlayerId; 2] = [1, 2];
    let engine = match config.rng_seed {
        Some(seed) => YahtzeeEngine::with_seed(&players, seed),
        None => YahtzeeEngine::new(&players),
    };
    let handle = SessionHandle::spawn(2, engine, Vec::new(), config);

    loop {
        let state = handle.state(None).await?;
        let Some(player) = state.current_player else {
            info!(winner = ?state.winner, round = state.round, "快艇骰子演示结束");
            break;
        };

        handle
            .submit_json(player, r#"{"game":"yahtzee","type":"roll"}"#)
            .await?;
        let state = handle.state(Some(player)).await?;
        let Some(scores) = state.players.iter().find(|p| p.id == player) else {
            break;
        };
        let best = Category::ALL
            .iter()
            .copied()
            .filter(|c| scores.scores[c.index()].is_none())
            .max_by_key(|c| (c.score(&state.dice), std::cmp::Reverse(c.index())));
        let Some(category) = best else {
            break;
        };

        let json = serde_json::to_string(&GameMove::Yahtzee(YahtzeeMove::Score { category }))?;
        let response = handle.submit_json(player, &json).await?;
        if !response.valid {
            anyhow::bail!("计分被拒绝: {:?}", response.message);
        }
        info!(player, %category, "锁定计分");
    }

    Ok(())
}
