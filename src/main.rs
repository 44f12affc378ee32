use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ttt_solver::min_max::cache::ArrayCache;
use ttt_solver::min_max::stats::SimpleStats;
use ttt_solver::min_max::{format_3_by_3, to_score_board, Searcher};
use ttt_solver::{evaluate, play_out, CellState, GameBoard, Marks, Opponent, Strength, Tally};

#[derive(Parser)]
#[command(name = "ttt-solver")]
#[command(version, about = "Tic-tac-toe move selection at three strengths", long_about = None)]
struct Cli {
    /// Seed for the random strengths; a fresh seed per run if absent
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Let two strengths play each other
    Duel {
        /// Strength playing X (moves first)
        #[arg(long, default_value = "optimal")]
        x: Strength,

        /// Strength playing O
        #[arg(long, default_value = "random")]
        o: Strength,

        /// Number of games
        #[arg(long, default_value_t = 100)]
        games: usize,
    },

    /// Score every empty cell of a board, e.g. "XX.OO...."
    Analyze {
        board: GameBoard,

        /// Mark the computer plays on this board
        #[arg(long, default_value = "X")]
        ai: CellState,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "starting");

    match cli.command {
        Commands::Duel { x, o, games } => duel(x, o, games, seed),
        Commands::Analyze { board, ai } => analyze(&board, ai),
    }
}

fn duel(x: Strength, o: Strength, games: usize, seed: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x_player = Opponent::with_rng(x, Marks::for_ai(CellState::X)?, StdRng::from_rng(&mut rng)?);
    let mut o_player = Opponent::with_rng(o, Marks::for_ai(CellState::O)?, StdRng::from_rng(&mut rng)?);
    let mut tally = Tally::default();
    for game in 0..games {
        let (_, verdict) = play_out(&mut x_player, &mut o_player).with_context(|| format!("game {game}"))?;
        tally.record(verdict);
    }
    println!("{x} (X) vs {o} (O): {tally}");
    Ok(())
}

fn analyze(board: &GameBoard, ai: CellState) -> Result<()> {
    println!("{board}");
    let verdict = evaluate(board);
    println!("verdict: {verdict}");
    if verdict.is_terminal() {
        return Ok(());
    }

    let mut searcher = Searcher::with(Marks::for_ai(ai)?, ArrayCache::new(), SimpleStats::default());
    let scored_moves = searcher.score_possible_moves(board)?;
    let scores = to_score_board(&scored_moves).map(|score| match score {
        Some(score) => score.to_string(),
        None => ".".to_string(),
    });
    println!("scores for {ai}:\n{}", format_3_by_3(&scores));

    let best = searcher.best_move(board)?;
    println!("best move: {} (score {})", best.min_max_move, best.score);
    println!("{:?}", searcher.stats);
    Ok(())
}
