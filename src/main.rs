use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use play_2048::config::Config;
use play_2048::engine::{Move, Score, Tile};
use play_2048::leaderboard::{Initials, Leaderboard, LocalLeaderboard};
use play_2048::session::GameSession;

#[derive(Debug, Parser)]
#[command(name = "play-2048", version, about = "2048 in the terminal")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Cmd>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Seed for tile spawning (overrides the config file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Goal tile (overrides the config file)
    #[arg(long, global = true)]
    target: Option<Tile>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Play interactively: one command per line (up/down/left/right or w/a/s/d,
    /// `cheat <value> <x> <y>`, `restart`, `quit`)
    Play,
    /// Play many games with a uniform random policy and report statistics
    Simulate {
        /// Number of games to play
        #[arg(long, default_value_t = 1000)]
        games: u64,
        /// Suppress the progress bar
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut config = match &args.config {
        Some(path) => Config::from_toml(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(target) = args.target {
        config.target = target;
    }
    config.validate()?;
    info!("config: {config:?}");

    match args.cmd.unwrap_or(Cmd::Play) {
        Cmd::Play => play(config),
        Cmd::Simulate { games, quiet } => simulate(&config, games, quiet),
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn render<R>(session: &GameSession<R>, leaderboard: &LocalLeaderboard) {
    println!("{}", session.board());
    let mut status = format!("Score: {} | Best: {}", session.score(), leaderboard.top());
    if session.reached_target() {
        status.push_str(&format!(" | {} reached!", session.target()));
    }
    println!("{status}");
}

fn play(config: Config) -> Result<()> {
    let mut leaderboard = LocalLeaderboard::new(config.leaderboard.into());
    let mut session = GameSession::new(rng_from(config.seed)).with_target(config.target);
    render(&session, &leaderboard);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while let Some(line) = lines.next() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else { continue };

        match command.to_ascii_lowercase().as_str() {
            "quit" | "q" | "exit" => break,
            "restart" | "new" => {
                session.restart();
                render(&session, &leaderboard);
            }
            "cheat" => {
                let parsed: Result<Vec<u32>, _> = words.map(str::parse).collect();
                match parsed.as_deref() {
                    Ok(&[value, x, y]) => match session.set_tile(value, x as usize, y as usize) {
                        Ok(()) => render(&session, &leaderboard),
                        Err(e) => eprintln!("{e}"),
                    },
                    _ => eprintln!("usage: cheat <value> <x> <y>"),
                }
            }
            symbol => match session.play_str(symbol) {
                Ok(report) if report.changed => {
                    render(&session, &leaderboard);
                    if report.game_over {
                        println!("Game over! Final score: {}", report.score);
                        if let Some(initials) = ask_initials(&mut lines)? {
                            if session.offer_score(&initials, &mut leaderboard)? {
                                println!("New top score: {}", leaderboard.top());
                            }
                        }
                        session.restart();
                        render(&session, &leaderboard);
                    }
                }
                Ok(_) => println!("Can't move {symbol}"),
                Err(e) => eprintln!("{e}"),
            },
        }
    }
    Ok(())
}

/// Prompt until three letters are entered; an empty line skips submission.
fn ask_initials<B: BufRead>(lines: &mut io::Lines<B>) -> Result<Option<Initials>> {
    loop {
        print!("Enter your initials (3 letters, empty to skip): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { return Ok(None) };
        let line = line?;
        if line.trim().is_empty() {
            return Ok(None);
        }
        match line.parse::<Initials>() {
            Ok(initials) => return Ok(Some(initials)),
            Err(e) => eprintln!("{e}"),
        }
    }
}

struct GameResult {
    score: Score,
    highest_tile: Tile,
    moves: u64,
}

fn play_random_game(seed: u64, target: Tile) -> GameResult {
    let mut policy = StdRng::seed_from_u64(seed.rotate_left(32) ^ 0x2048);
    let mut session = GameSession::new(StdRng::seed_from_u64(seed)).with_target(target);
    while !session.is_game_over() {
        let dir = Move::ALL[policy.gen_range(0..Move::ALL.len())];
        // blocked moves are fine; game over is checked by the loop condition
        let _ = session.play(dir);
    }
    GameResult {
        score: session.score(),
        highest_tile: session.board().highest_tile(),
        moves: session.moves(),
    }
}

fn simulate(config: &Config, games: u64, quiet: bool) -> Result<()> {
    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} games | {elapsed_precise}")?,
        );
        pb
    };

    let results: Vec<GameResult> = (0..games)
        .into_par_iter()
        .map(|i| {
            let result = play_random_game(base_seed.wrapping_add(i), config.target);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_and_clear();

    if results.is_empty() {
        println!("No games played.");
        return Ok(());
    }
    let total: Score = results.iter().map(|r| r.score).sum();
    let best = results.iter().map(|r| r.score).max().unwrap_or(0);
    let best_tile = results.iter().map(|r| r.highest_tile).max().unwrap_or(0);
    let reached = results.iter().filter(|r| r.highest_tile >= config.target).count();
    let moves: u64 = results.iter().map(|r| r.moves).sum();
    println!(
        "Games: {} | mean score: {:.1} | best score: {} | best tile: {} \
         | mean moves: {:.1} | reached {}: {}",
        results.len(),
        total as f64 / results.len() as f64,
        best,
        best_tile,
        moves as f64 / results.len() as f64,
        config.target,
        reached
    );
    Ok(())
}
