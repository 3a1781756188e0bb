use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Context;
use serde::Serialize;
use sweeper_core::{CellView, Coord, Game, GameState, RevealOutcome, StatCounts};

/// One line of the command script.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal { x: i64, y: i64 },
    Flag { x: i64, y: i64 },
    View { x: i64, y: i64 },
    Changes,
    Status,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or("empty command")?;
        let mut coord = |axis: &str| -> Result<i64, String> {
            let word = words
                .next()
                .ok_or_else(|| format!("{name}: missing {axis} coordinate"))?;
            word.parse()
                .map_err(|_| format!("{name}: invalid {axis} coordinate {word:?}"))
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "reveal" => Self::Reveal {
                x: coord("x")?,
                y: coord("y")?,
            },
            "flag" => Self::Flag {
                x: coord("x")?,
                y: coord("y")?,
            },
            "view" => Self::View {
                x: coord("x")?,
                y: coord("y")?,
            },
            "changes" => Self::Changes,
            "status" => Self::Status,
            _ => return Err(format!("unknown command {name:?}")),
        };

        match words.next() {
            Some(extra) => Err(format!("{name}: unexpected argument {extra:?}")),
            None => Ok(command),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChangedCell {
    pub x: Coord,
    pub y: Coord,
    pub view: CellView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusReport {
    pub state: GameState,
    pub width: Coord,
    pub height: Coord,
    pub remaining_mines: i64,
    pub elapsed_secs: u64,
    pub counts: StatCounts,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    Reveal { outcome: RevealOutcome },
    Flag { view: CellView },
    View { view: CellView },
    Changes { cells: Vec<ChangedCell> },
    Status(StatusReport),
}

/// What gets written for each command, `{"ok": ...}` or `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Ok(Reply),
    Error(String),
}

/// Drives one game from a command script.
#[derive(Debug)]
pub struct Session {
    game: Game,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn execute(&mut self, command: Command) -> sweeper_core::Result<Reply> {
        let game = &mut self.game;
        Ok(match command {
            Command::Reveal { x, y } => Reply::Reveal {
                outcome: game.reveal(x, y)?,
            },
            Command::Flag { x, y } => {
                game.cycle_flag(x, y)?;
                Reply::Flag {
                    view: game.cell_view(x, y)?,
                }
            }
            Command::View { x, y } => Reply::View {
                view: game.cell_view(x, y)?,
            },
            Command::Changes => {
                let mut cells = Vec::new();
                for location in game.drain_changed_locations() {
                    cells.push(ChangedCell {
                        x: location.x(),
                        y: location.y(),
                        view: game.cell_view_at(location)?,
                    });
                }
                Reply::Changes { cells }
            }
            Command::Status => Reply::Status(StatusReport {
                state: game.state(),
                width: game.width(),
                height: game.height(),
                remaining_mines: game.remaining_mines(),
                elapsed_secs: game.elapsed_secs(),
                counts: game.stats().counts(),
            }),
        })
    }

    /// Handles one script line, blank lines and `#` comments produce nothing.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            return None;
        }

        let response = match line.parse::<Command>() {
            Ok(command) => match self.execute(command) {
                Ok(reply) => Response::Ok(reply),
                Err(err) => {
                    log::info!("Rejected {line:?}: {err}");
                    Response::Error(err.to_string())
                }
            },
            Err(err) => {
                log::warn!("Malformed command {line:?}: {err}");
                Response::Error(err)
            }
        };
        Some(response)
    }

    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        for (number, line) in input.lines().enumerate() {
            let line = line.with_context(|| format!("could not read script line {}", number + 1))?;
            if let Some(response) = self.handle_line(&line) {
                serde_json::to_writer(&mut output, &response)?;
                writeln!(output)?;
            }
        }
        output.flush()?;
        Ok(())
    }
}
