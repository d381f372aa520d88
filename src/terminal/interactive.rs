use std::io::{self, Write};

use crate::ViewDisplay;
use crate::game_logic::GameEngine;
use crate::terminal::TerminalDisplay;
use crate::view::Perspective;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive terminal for playing a game against yourself.
///
/// Both players share the terminal, so switch views with `v` to respect the fog.
pub fn run_interactive_terminal() {
    let mut engine = GameEngine::new();
    let mut display = TerminalDisplay::new();
    let mut perspective = Perspective::White;

    clear_screen();
    draw_interface(&mut display, &engine, perspective);

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            log::error!("Failed to flush stdout: {e}");
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::error!("Failed to read input: {e}");
                break;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "m" => {
                if parts.len() < 3 {
                    println!("Usage: m <from> <to>");
                    continue;
                }
                match engine.make_move(parts[1], parts[2]) {
                    Ok(true) => {
                        perspective = Perspective::from(engine.active_color());
                        clear_screen();
                        draw_interface(&mut display, &engine, perspective);
                    }
                    Ok(false) => println!("❌ Illegal move"),
                    Err(e) => println!("❌ {e}"),
                }
            }
            "v" => {
                if parts.len() < 2 {
                    println!("Usage: v <white|black|audience>");
                    continue;
                }
                match parts[1].parse::<Perspective>() {
                    Ok(p) => {
                        perspective = p;
                        clear_screen();
                        draw_interface(&mut display, &engine, perspective);
                    }
                    Err(e) => println!("❌ {e}"),
                }
            }
            "load" => {
                if parts.len() < 2 {
                    println!("Usage: load <fen>");
                    continue;
                }
                // Rejoin the rest of the parts as FEN contains spaces
                match GameEngine::from_fen(&parts[1..].join(" ")) {
                    Ok(loaded) => {
                        engine = loaded;
                        perspective = Perspective::from(engine.active_color());
                        clear_screen();
                        draw_interface(&mut display, &engine, perspective);
                        println!("\n✅ Position loaded from FEN");
                    }
                    Err(e) => println!("❌ {e}"),
                }
            }
            "r" => {
                engine = GameEngine::new();
                perspective = Perspective::White;
                clear_screen();
                draw_interface(&mut display, &engine, perspective);
                println!("\n🔄 Reset to initial state");
            }
            "p" => {
                clear_screen();
                draw_interface(&mut display, &engine, perspective);
            }
            "q" => break,
            _ => println!("Unknown command"),
        }
    }
}

/// Draws the complete interface: help text, status line and board.
fn draw_interface(display: &mut TerminalDisplay, engine: &GameEngine, perspective: Perspective) {
    println!("♟️  Fog of War Chess");
    println!();
    println!(
        "Commands: m <from> <to> | v <white|black|audience> | load <fen> | r (reset) | p (refresh) | q (quit)"
    );
    println!();
    println!(
        "View: {perspective:?} | To move: {:?} | State: {}",
        engine.active_color(),
        engine.query_result()
    );
    println!();

    if let Err(e) = display.show(&engine.render(perspective)) {
        log::error!("Failed to draw board: {e}");
    }
}
