//! Terms and Conditions Demo
//!
//! Plays a short session with a simulated player and logs every round.
//!
//! Usage: `terms-conditions-demo [config.toml]`

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use terms_conditions::{
    GameConfig, PackingSession, RandomSource, DeterministicRng, Item, Verdict, VERSION,
};

/// Rounds played when the config does not limit them.
const DEMO_ROUNDS: u32 = 5;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Terms and Conditions v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => GameConfig::default(),
    };

    let rounds = match config.session.rounds {
        0 => DEMO_ROUNDS,
        n => n,
    };

    let mut session = PackingSession::new(config)?;
    info!("Session {} seed {}", hex::encode(session.id()), session.seed());

    // The simulated player guesses, seeded from the session for repeatable runs
    let mut player = DeterministicRng::new(session.seed() ^ 0x5EED);
    let mut last_order = None;

    for _ in 0..rounds {
        let order = session.deal()?.clone();
        info!(
            "Round {}: order [{}], box [{}]",
            session.round(),
            names(&session, order.ordered()),
            names(&session, order.packed_shuffled()),
        );
        last_order = Some(order);

        let verdict = Verdict::from_answer(player.next_int(2) == 0);
        let outcome = session.submit(verdict)?;
        info!(
            "Player said {:?}, box was {}: {} (hash {})",
            outcome.verdict,
            if outcome.correctly_packed { "correct" } else { "wrong" },
            if outcome.player_was_right { "RIGHT" } else { "WRONG" },
            hex::encode(&outcome.order_hash[..8]),
        );
    }

    let stats = session.stats();
    info!("=== Session Results ===");
    info!(
        "{} rounds, {} right, {} wrong ({:.0}% accuracy)",
        stats.rounds_played,
        stats.correct_answers,
        stats.wrong_answers,
        stats.accuracy() * 100.0,
    );

    if let Some(order) = last_order {
        println!("{}", serde_json::to_string_pretty(&order)?);
    }

    Ok(())
}

fn names(session: &PackingSession, items: &[Item]) -> String {
    items
        .iter()
        .map(|item| session.catalog().display_name(item.code()))
        .collect::<Vec<_>>()
        .join(", ")
}
