//! Line-based command shell.
//!
//! Reads one command per line and answers in the same shape as GTP: `= text`
//! on success, `? text` on failure. Blank lines and `#` comments are skipped.
//!
//! ## Supported Commands
//!
//! - `help` - List commands
//! - `print` - Show the board (with territory once scored)
//! - `play <coord>` - Play for the side to move, e.g. `play D4`
//! - `pass` - Pass; a pass that repeats your own position ends the game
//! - `forfeit [black|white]` - Resign (default: the side to move)
//! - `score` - Current score, komi included
//! - `quit` - Exit
//!
//! Coordinates are column letters (`A`..`Z`, `AA`, ...) followed by a row
//! number counted from the bottom edge, so `A1` is the bottom-left corner.

use std::io::{self, BufRead, Write};

use crate::board::{Color, Grid, Point};
use crate::game::{Game, Winner};

/// The list of known commands with a one-line description.
const COMMANDS: &[(&str, &str)] = &[
    ("forfeit", "forfeit [black|white]  resign the game"),
    ("help", "help                   show this list"),
    ("pass", "pass                   pass the turn"),
    ("play", "play <coord>           place a stone, e.g. play D4"),
    ("print", "print                  show the board"),
    ("quit", "quit                   exit"),
    ("score", "score                  show the current score"),
];

/// Interactive front end around a single [`Game`].
pub struct Shell {
    game: Game,
}

impl Shell {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let was_over = self.game.is_over();
            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            writeln!(output, "{prefix} {message}")?;

            if !was_over && self.game.is_over() {
                write!(output, "{}", render(self.game.grid()))?;
                writeln!(output, "{}", self.result())?;
            }
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "help" => {
                let lines: Vec<&str> = COMMANDS.iter().map(|(_, usage)| *usage).collect();
                (true, format!("\n{}", lines.join("\n")))
            }

            "print" => (true, format!("\n{}", render(self.game.grid()).trim_end())),

            "play" => {
                let Some(text) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                if self.game.is_over() {
                    return (false, "game is over".to_string());
                }
                let grid = self.game.grid();
                let Some(point) = parse_point(text, grid.width(), grid.height()) else {
                    return (false, format!("invalid coordinate: {text}"));
                };
                match self.game.play(point) {
                    Ok(placement) if placement.captured > 0 => {
                        (true, format!("captured {}", placement.captured))
                    }
                    Ok(placement) if placement.self_captured > 0 => {
                        (true, format!("self-capture, lost {}", placement.self_captured))
                    }
                    Ok(_) => (true, String::new()),
                    Err(err) => (false, err.to_string()),
                }
            }

            "pass" => {
                if self.game.is_over() {
                    return (false, "game is over".to_string());
                }
                match self.game.pass() {
                    Ok(()) => (true, String::new()),
                    Err(err) => (false, err.to_string()),
                }
            }

            "forfeit" => {
                if self.game.is_over() {
                    return (false, "game is over".to_string());
                }
                let color = match args.first() {
                    None => self.game.to_move(),
                    Some(text) => match parse_color(text) {
                        Some(color) => color,
                        None => return (false, format!("invalid color: {text}")),
                    },
                };
                self.game.forfeit(color);
                (true, String::new())
            }

            "score" => {
                let (black, white) = self.game.scores();
                (
                    true,
                    format!("Black {black}, White {white} (komi {})", self.game.komi()),
                )
            }

            "quit" => (true, String::new()),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// One-line description of a finished game.
    fn result(&self) -> String {
        match (self.game.winner(), self.game.final_score()) {
            (Winner::Undecided, _) => "game in progress".to_string(),
            (Winner::Draw, Some((black, white))) => format!("Draw, {black} to {white}"),
            (winner, Some((black, white))) => format!("{winner}, Black {black} to White {white}"),
            (winner, None) => format!("{winner} by forfeit"),
        }
    }
}

/// Render the board with coordinates. Once scored, territory shows as `x`/`o`.
pub fn render(grid: &Grid) -> String {
    let col_w = column_label(grid.width() - 1).len();
    let row_w = grid.height().to_string().len();

    let mut out = " ".repeat(row_w);
    for col in 0..grid.width() {
        out.push_str(&format!(" {:>col_w$}", column_label(col)));
    }
    out.push('\n');

    for row in 0..grid.height() {
        out.push_str(&format!("{:>row_w$}", grid.height() - row));
        for col in 0..grid.width() {
            let ch = match (grid.stone_at((col, row)), grid.territory_at((col, row))) {
                (Some(Color::Black), _) => 'X',
                (Some(Color::White), _) => 'O',
                (None, Some(Color::Black)) => 'x',
                (None, Some(Color::White)) => 'o',
                (None, None) => '.',
            };
            out.push_str(&format!(" {ch:>col_w$}"));
        }
        out.push('\n');
    }
    out
}

/// Column letters: `A`..`Z`, then `AA`, `AB`, ...
pub fn column_label(col: u8) -> String {
    let mut n = col as u32 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Parse a coordinate such as `D4` or `aa12` on a board of the given size.
///
/// Returns `None` for malformed text or points off the board.
pub fn parse_point(text: &str, width: u8, height: u8) -> Option<Point> {
    let split = text.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = text.split_at(split);
    // two letters already reach past the widest board
    if letters.is_empty() || letters.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut col: u32 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (b.to_ascii_uppercase() - b'A') as u32 + 1;
    }
    let col = col - 1;

    let number: u32 = digits.parse().ok()?;
    if col >= width as u32 || number == 0 || number > height as u32 {
        return None;
    }
    Some((col as u8, (height as u32 - number) as u8))
}

/// Inverse of [`parse_point`].
pub fn format_point((col, row): Point, height: u8) -> String {
    format!("{}{}", column_label(col), height - row)
}

fn parse_color(text: &str) -> Option<Color> {
    match text.to_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None,
    }
}
