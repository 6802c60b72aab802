// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A terminal two-player front-end for the gambit rule engine. This binary
//! is the input-mapping, rendering, promotion-choice, and score-display
//! collaborator all at once; every rule lives in the library.

#[macro_use]
extern crate clap;

use std::convert::TryFrom;
use std::io::{self, BufRead, Write};
use std::process;

use clap::{App, Arg};
use gambit::{ClickOutcome, Color, File, Game, MoveFlags, PieceId, PieceKind, Rank, Square};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("FEN")
                .help("FEN string for the starting position")
                .index(1),
        )
        .get_matches();

    let mut game = match matches.value_of("FEN") {
        Some(fen) => match Game::from_fen(fen) {
            Ok(game) => game,
            Err(err) => {
                println!("invalid fen: {:?}", err);
                process::exit(1);
            }
        },
        None => Game::new(),
    };

    println!("gambit: two-player chess");
    println!("enter a square like e2 to select, the same square to deselect.");
    println!("other commands: board, fen, scores, quit");
    main_loop(&mut game);
}

fn main_loop(game: &mut Game) {
    let stdin_ref = io::stdin();
    let mut stdin = stdin_ref.lock();

    render(game);
    loop {
        // A promotion left unanswered (say, by an EOF mid-prompt) keeps the
        // pawn un-promoted; ask again before accepting new input.
        let pending: Vec<(PieceId, Square)> = game.pending_promotions().collect();
        for (id, _) in pending {
            prompt_promotion(game, id, &mut stdin);
        }

        print!("{}> ", player_name(game.side_to_move()));
        io::stdout().flush().unwrap();

        let mut buf = String::new();
        match stdin.read_line(&mut buf) {
            Ok(0) => return,
            Ok(_) => {}
            Err(err) => {
                println!("fatal i/o error: {}", err);
                return;
            }
        }

        let token = buf.trim();
        if token.is_empty() {
            continue;
        }

        match token {
            "quit" => return,
            "board" => render(game),
            "fen" => println!("{}", game.as_fen()),
            "scores" => show_scores(game),
            _ => match parse_square(token) {
                Some(square) => handle_click(game, square, &mut stdin),
                None => println!("unrecognized input: {}", token),
            },
        }
    }
}

fn handle_click<R: BufRead>(game: &mut Game, square: Square, input: &mut R) {
    match game.click(square) {
        // Clicking an empty square or the opponent's piece selects nothing.
        ClickOutcome::Ignored => {}
        ClickOutcome::Selected(square) => println!("selected {}", square),
        ClickOutcome::Deselected => println!("selection cleared"),
        ClickOutcome::Rejected(err) => println!("{}", err),
        ClickOutcome::Moved(record) => {
            render(game);
            if record.flags.contains(MoveFlags::CAPTURE) {
                show_scores(game);
            }

            if record.flags.contains(MoveFlags::PROMOTION) {
                prompt_promotion(game, record.piece, input);
            }
        }
    }
}

fn prompt_promotion<R: BufRead>(game: &mut Game, piece: PieceId, input: &mut R) {
    loop {
        print!("promote to [q/r/b/n]: ");
        io::stdout().flush().unwrap();

        let mut buf = String::new();
        match input.read_line(&mut buf) {
            Ok(0) => return,
            Ok(_) => {}
            Err(_) => return,
        }

        let kind = match buf.trim() {
            "q" => PieceKind::Queen,
            "r" => PieceKind::Rook,
            "b" => PieceKind::Bishop,
            "n" => PieceKind::Knight,
            other => {
                println!("unrecognized choice: {}", other);
                continue;
            }
        };

        match game.resolve_promotion(piece, kind) {
            Ok(()) => {
                render(game);
                return;
            }
            Err(err) => {
                println!("{}", err);
                return;
            }
        }
    }
}

fn render(game: &Game) {
    println!("{}", game.board());
}

fn show_scores(game: &Game) {
    // Each player's tally is the material captured from the other side.
    println!(
        "captures: white player {}, black player {}",
        game.score(Color::Black),
        game.score(Color::White)
    );
}

fn player_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

/// Maps a typed square like "e2" onto a board square, refusing anything
/// that is not a file letter followed by a rank digit. The library never
/// sees out-of-range coordinates.
fn parse_square(token: &str) -> Option<Square> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() != 2 {
        return None;
    }

    let file = File::try_from(chars[0]).ok()?;
    let rank = Rank::try_from(chars[1]).ok()?;
    Some(Square::at(rank, file))
}
