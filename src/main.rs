//! Gomoku CPU command-line demo
//!
//! Runs the engine through a set of tactical positions, then lets two CPU
//! players finish a game against each other.
//!
//! Usage: `gomoku [easy|hard] [seed]`

use std::env;
use std::process::ExitCode;

use gomoku_cpu::rules::check_win;
use gomoku_cpu::search::get_valid_moves;
use gomoku_cpu::{
    AIEngine, Board, Difficulty, EngineConfig, GameMode, GameOutcome, GameState, Pos, Stone,
};

const DEFAULT_SEED: u64 = 42;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let difficulty = match args.next().map(|s| s.parse::<Difficulty>()) {
        None => Difficulty::Hard,
        Some(Ok(d)) => d,
        Some(Err(e)) => {
            eprintln!("error: {}", e);
            eprintln!("usage: gomoku [easy|hard] [seed]");
            return ExitCode::FAILURE;
        }
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        None => DEFAULT_SEED,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("error: invalid seed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("===========================================");
    println!("       Gomoku CPU v{}", env!("CARGO_PKG_VERSION"));
    println!("===========================================\n");

    let mut engine = AIEngine::new(EngineConfig::hard().with_seed(seed));

    println!("--- Test 1: Empty Board ---");
    test_empty_board(&mut engine);

    println!("\n--- Test 2: Find Winning Move ---");
    test_winning_move(&mut engine);

    println!("\n--- Test 3: Block Opponent Win ---");
    test_block_opponent(&mut engine);

    println!("\n--- Test 4: Quiet Position ---");
    test_quiet_position(&mut engine);

    println!("\n--- Game: {} CPU vs {} CPU ---", difficulty, difficulty);
    play_cpu_game(difficulty, seed);

    println!("\n===========================================");
    println!("          All Tests Completed!");
    println!("===========================================");
    ExitCode::SUCCESS
}

fn report(board: &mut Board, engine: &mut AIEngine, color: Stone, expected: &[Pos]) -> Option<Pos> {
    let result = engine.get_move_with_stats(board, color);
    let Some(m) = result.best_move else {
        println!("  Result: FAIL - No move found");
        return None;
    };

    println!("  {:?} plays: {}", color, m);
    println!("  Search type: {:?}", result.search_type);
    println!("  Score: {}, nodes: {}", result.score, result.nodes);
    println!("  Time: {}ms", result.time_ms);
    if expected.contains(&m) {
        println!("  Result: PASS");
    } else {
        println!("  Result: FAIL - expected one of {:?}", expected);
    }
    Some(m)
}

fn diagonal_four(color: Stone) -> Board {
    let mut board = Board::new();
    for i in 5..9 {
        board
            .place_stone(Pos::new(i, i), color)
            .expect("demo position is legal");
    }
    board
}

fn test_empty_board(engine: &mut AIEngine) {
    let mut board = Board::new();
    println!("  Expected: Center (7, 7)");
    report(&mut board, engine, Stone::Black, &[Pos::new(7, 7)]);
}

fn test_winning_move(engine: &mut AIEngine) {
    let mut board = diagonal_four(Stone::Black);
    println!("  Position: Black has 4 on the diagonal (5, 5) .. (8, 8)");
    let expected = [Pos::new(4, 4), Pos::new(9, 9)];
    if let Some(m) = report(&mut board, engine, Stone::Black, &expected) {
        if board.place_stone(m, Stone::Black).is_ok() {
            println!("  Five completed: {}", check_win(&board, m, Stone::Black));
        }
    }
}

fn test_block_opponent(engine: &mut AIEngine) {
    let mut board = diagonal_four(Stone::White);
    println!("  Position: White has 4 on the diagonal (5, 5) .. (8, 8)");
    report(&mut board, engine, Stone::Black, &[Pos::new(4, 4), Pos::new(9, 9)]);
}

fn test_quiet_position(engine: &mut AIEngine) {
    let mut board = Board::new();
    let stones = [
        (Pos::new(7, 7), Stone::Black),
        (Pos::new(7, 8), Stone::White),
        (Pos::new(8, 6), Stone::Black),
        (Pos::new(6, 9), Stone::White),
    ];
    for (pos, color) in stones {
        board.place_stone(pos, color).expect("demo position is legal");
    }
    println!("  Position: two stones each, no threats");
    let candidates = get_valid_moves(&board);
    report(&mut board, engine, Stone::Black, &candidates);
}

fn play_cpu_game(difficulty: Difficulty, seed: u64) {
    let mut state = GameState::new(GameMode::HotSeat);
    let mut black = AIEngine::new(EngineConfig::for_difficulty(difficulty).with_seed(seed));
    let mut white = AIEngine::new(
        EngineConfig::for_difficulty(difficulty).with_seed(seed.wrapping_add(1)),
    );

    while !state.is_over() {
        let color = state.current_turn;
        let engine = if color == Stone::Black { &mut black } else { &mut white };
        let mut board = state.board.clone();
        let Some(pos) = engine.get_move(&mut board, color) else {
            break;
        };
        if let Err(e) = state.try_place_stone(pos) {
            eprintln!("  CPU move {} rejected: {}", pos, e);
            break;
        }
    }

    println!("{}", state.board);
    println!("  Moves played: {}", state.move_history.len());
    match state.outcome {
        Some(GameOutcome::Win { winner, line }) => {
            println!("  {:?} wins: {} .. {}", winner, line[0], line[line.len() - 1]);
        }
        Some(GameOutcome::Draw) => println!("  Draw: board is full"),
        Some(GameOutcome::Resign { winner }) => println!("  {:?} wins by resignation", winner),
        None => println!("  Game stopped early"),
    }
}
