// Simple command-line application to play chess
//
// Moves are entered in coordinate form, like `e2e4` or `e7e8n`. Other commands are `undo`,
// `moves`, `fen` and `quit`. Set `RUST_LOG=trace` to see what the move chain is doing.

use raychess::{board::PrettyStyle, Color, Move, MoveChain};
use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    env_logger::init();

    let mut stdin = io::stdin().lock();
    let mut chain = MoveChain::new_initial();

    loop {
        println!("{}", chain.last().pretty(PrettyStyle::Ascii));
        let moves = chain.legal_moves();
        let side = match chain.last().side() {
            Color::White => "White",
            Color::Black => "Black",
        };
        if moves.is_empty() {
            if chain.last().is_check() {
                println!("{} is checkmated", side);
            } else {
                println!("{} has no legal moves", side);
            }
            println!("Moves: {}", chain.uci_list());
            return Ok(());
        }

        print!("{} move ({}): ", side, chain.last().raw().move_number);
        io::stdout().flush()?;
        let mut s = String::new();
        if stdin.read_line(&mut s)? == 0 {
            return Ok(());
        }

        match s.trim() {
            "quit" => return Ok(()),
            "undo" => match chain.undo_last_move() {
                Some(mv) => println!("Undone {}", mv),
                None => println!("Nothing to undo"),
            },
            "moves" => {
                let list: Vec<String> = moves.iter().map(Move::to_string).collect();
                println!("{}", list.join(" "));
            }
            "fen" => println!("{}", chain.last().as_fen()),
            s => {
                // Parsing and applying are separated here to show both steps. `push_uci()`
                // would do the same in one call.
                let mv = match Move::from_uci(s, chain.last()) {
                    Ok(mv) => mv,
                    Err(e) => {
                        println!("Bad move: {}", e);
                        println!();
                        continue;
                    }
                };
                if let Err(e) = chain.apply_move(mv) {
                    println!("Bad move: {}", e);
                }
            }
        }

        println!();
    }
}
