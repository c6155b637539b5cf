//! Text commands for the terminal front end.
//!
//! Each input line is one command. Paths take the rest of the line so they may
//! contain spaces.

use std::path::PathBuf;

use thiserror::Error;

use crate::message::Message;
use crate::model::Point;
use crate::zoom_math::ScreenPos;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forward to the session
    Message(Message),
    /// Print the session summary
    Status,
    /// Print command help
    Help,
    /// Leave the program
    Quit,
}

/// Why an input line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

/// One-line usage for every command, printed by `help`.
pub const HELP: &str = "\
open [path]            load an image (no path opens a dialog)
click <sx> <sy>        press the pointer at a display position
point <x> <y>          add a vertex in image pixels
close                  close the current polygon
undo                   remove the last polygon or the open chain
reset                  discard image and annotations
class <id>             select class 0-9999 for new polygons
zoom <in|out> <sx> <sy> zoom one step around a display position
pan <dx> <dy>          move the view
view-reset             zoom 1, no pan
save-mask [path]       write the binary mask image
save-labels [path]     write YOLO labels
status                 show the session state
help                   show this text
quit                   exit";

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match word.to_ascii_lowercase().as_str() {
        "open" => Command::Message(Message::OpenImage(optional_path(rest))),
        "click" => {
            let (x, y) = pair::<f32>(&args, "click <sx> <sy>")?;
            Command::Message(Message::PointerPressed(ScreenPos::new(x, y)))
        }
        "point" => {
            let (x, y) = pair::<i32>(&args, "point <x> <y>")?;
            Command::Message(Message::AddPoint(Point::new(x, y)))
        }
        "close" => Command::Message(Message::ClosePolygon),
        "undo" => Command::Message(Message::Undo),
        "reset" => Command::Message(Message::Reset),
        "class" => {
            const USAGE: &str = "class <id>";
            let [id] = args[..] else {
                return Err(CommandError::Usage(USAGE));
            };
            let id = id.parse().map_err(|_| CommandError::Usage(USAGE))?;
            Command::Message(Message::SelectClass(id))
        }
        "zoom" => {
            const USAGE: &str = "zoom <in|out> <sx> <sy>";
            let [direction, sx, sy] = args[..] else {
                return Err(CommandError::Usage(USAGE));
            };
            let steps = match direction {
                "in" | "+" => 1,
                "out" | "-" => -1,
                _ => return Err(CommandError::Usage(USAGE)),
            };
            let (x, y) = pair::<f32>(&[sx, sy], USAGE)?;
            Command::Message(Message::Zoom {
                steps,
                cursor: ScreenPos::new(x, y),
            })
        }
        "pan" => {
            let (dx, dy) = pair::<f32>(&args, "pan <dx> <dy>")?;
            Command::Message(Message::Pan { dx, dy })
        }
        "view-reset" => Command::Message(Message::ResetView),
        "save-mask" => Command::Message(Message::SaveMask(optional_path(rest))),
        "save-labels" => Command::Message(Message::SaveLabels(optional_path(rest))),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };

    Ok(Some(command))
}

fn optional_path(rest: &str) -> Option<PathBuf> {
    (!rest.is_empty()).then(|| PathBuf::from(rest))
}

fn pair<T: std::str::FromStr>(args: &[&str], usage: &'static str) -> Result<(T, T), CommandError> {
    let [a, b] = args else {
        return Err(CommandError::Usage(usage));
    };
    match (a.parse(), b.parse()) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        _ => Err(CommandError::Usage(usage)),
    }
}
