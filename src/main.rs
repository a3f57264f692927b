use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use game_rules::feed::{records_from_path, GameSetup};
use game_rules::game::Game;
use game_rules::policy::{DecisionPolicy, RandomPolicy};
use game_rules::standard::standard_game;

mod console;

use console::{PromptPolicy, StdinSource};

/// Gemcourt
///
/// Play the gem-trading board game in the terminal, against other humans
/// or automated opponents.
#[derive(Parser, Debug)]
struct Args {
    /// Total number of players (2 to 4).
    #[clap(short, long, default_value = "2")]
    players: usize,
    /// How many of the seats are human; the rest are automated.
    #[clap(long, default_value = "1")]
    humans: usize,
    /// Seed for shuffling and automated decisions. Random by default.
    #[clap(short, long)]
    seed: Option<u64>,
    /// Card feed file. The built-in base game is used when absent.
    #[clap(short, long)]
    cards: Option<PathBuf>,
    /// Write the final game state to this file as JSON.
    #[clap(short, long)]
    dump: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    anyhow::ensure!(
        args.humans <= args.players,
        "{} human seats will not fit in a {}-player game",
        args.humans,
        args.players
    );

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("> seed: {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let names: Vec<String> = (1..=args.players)
        .map(|n| {
            if n <= args.humans {
                format!("Player {n}")
            } else {
                format!("Robot {n}")
            }
        })
        .collect();

    let mut game = build_game(&args, &names, &mut rng)?;

    let mut policies: Vec<Box<dyn DecisionPolicy>> = (0..args.players)
        .map(|seat| {
            if seat < args.humans {
                Box::new(PromptPolicy::new(StdinSource)) as Box<dyn DecisionPolicy>
            } else {
                Box::new(RandomPolicy::new(ChaCha8Rng::seed_from_u64(rng.gen())))
            }
        })
        .collect();

    game.run(&mut policies);

    println!("{}", console::render(&game));
    for winner in game.winners() {
        println!("> {} wins with {} points!", winner.name, winner.points());
    }

    if let Some(path) = &args.dump {
        std::fs::write(path, serde_json::to_string_pretty(&game)?)?;
        println!("> final state written to {}", path.display());
    }

    Ok(())
}

fn build_game(args: &Args, names: &[String], rng: &mut ChaCha8Rng) -> Result<Game> {
    let game = match &args.cards {
        Some(path) => {
            let records = records_from_path(path)?;
            GameSetup::from_records(&records)?.build(names, rng)?
        }
        None => standard_game(names, rng)?,
    };
    Ok(game)
}
