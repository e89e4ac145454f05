use anyhow::Result;
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twenty48_core::engine::{Direction, Game};

#[derive(Parser, Debug)]
struct Args {
    /// RNG seed driving both tile spawns and move selection.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Stop after this many applied moves even if the game is not over.
    #[arg(long)]
    max_steps: Option<u64>,
    /// Optional tracing filter, e.g. "info", "debug".
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut game = Game::new(&mut rng);
    info!(seed = args.seed, "starting game");

    let mut steps: u64 = 0;
    while !game.is_game_over() {
        if let Some(max) = args.max_steps {
            if steps >= max {
                info!(steps, "step budget reached");
                break;
            }
        }
        // A rejected direction costs nothing; while the game is live some
        // direction always changes the board, so random retry terminates.
        let dir = Direction::ALL[rng.gen_range(0..4)];
        if !game.apply_move(dir, &mut rng) {
            continue;
        }
        steps += 1;
        debug!(steps, ?dir, score = game.score(), "applied move");
        if steps % 100 == 0 {
            info!(
                steps,
                score = game.score(),
                highest_tile = game.highest_tile(),
                "progress"
            );
        }
    }

    println!("{game}");
    info!(
        steps,
        score = game.score(),
        highest_tile = game.highest_tile(),
        game_over = game.is_game_over(),
        "finished"
    );
    Ok(())
}
