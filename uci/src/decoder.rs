use std::str::FromStr;

use cozy_chess::{util::parse_uci_move, Board};
use log::warn;

use super::commands::{GoParams, Info, Score, UciInput, UciOutput};

/// Keywords that may follow a `searchmoves` list in a go command.
const GO_KEYWORDS: [&str; 11] = [
    "searchmoves",
    "ponder",
    "wtime",
    "btime",
    "winc",
    "binc",
    "movestogo",
    "depth",
    "nodes",
    "movetime",
    "infinite",
];

pub struct Decoder;

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes a command sent by a GUI (or by us, to the external engine).
    pub fn decode(&self, input: &str) -> UciInput {
        match input {
            "uci" => UciInput::Uci,
            "isready" => UciInput::IsReady,
            "ucinewgame" => UciInput::UciNewGame,

            _ if input.starts_with("debug") => UciInput::Debug(input.ends_with(" on")),
            _ if input.starts_with("position") => self.decode_position(input),
            _ if input.starts_with("go") => self.decode_go(input),
            _ if input.starts_with("setoption") => self.decode_setoption(input),
            _ if input.starts_with("stop") => UciInput::Stop,
            _ if input.starts_with("quit") => UciInput::Quit,

            _ => UciInput::Unknown(input.to_string()),
        }
    }

    /// Decodes a line printed by an engine.
    pub fn decode_output(&self, line: &str) -> UciOutput {
        match line {
            "uciok" => UciOutput::UciOk,
            "readyok" => UciOutput::ReadyOk,

            _ if line.starts_with("id name ") => {
                UciOutput::IdName(line["id name ".len()..].trim().to_string())
            }
            _ if line.starts_with("id author ") => {
                UciOutput::IdAuthor(line["id author ".len()..].trim().to_string())
            }
            _ if line.starts_with("bestmove") => self.decode_bestmove(line),
            _ if line.starts_with("info string") => {
                UciOutput::InfoString(line["info string".len()..].trim().to_string())
            }
            _ if line.starts_with("info") => UciOutput::Info(self.decode_info(line)),
            _ if line.starts_with("option") => UciOutput::Option(line.to_string()),

            _ => UciOutput::Raw(line.to_string()),
        }
    }

    fn decode_position(&self, input: &str) -> UciInput {
        let (setup, moves) = match input.split_once(" moves") {
            Some((setup, moves)) => (setup, Some(moves)),
            None => (input, None),
        };

        let mut board = if let Some((_, fen)) = setup.split_once("fen") {
            match Board::from_str(fen.trim()) {
                Ok(board) => board,
                Err(e) => {
                    warn!("Invalid FEN {:?}: {:?}", fen.trim(), e);
                    return UciInput::Unknown(input.to_string());
                }
            }
        } else {
            Board::default() // Default to startpos
        };

        for mv_str in moves.into_iter().flat_map(str::split_whitespace) {
            match parse_uci_move(&board, mv_str) {
                Ok(mv) if board.try_play(mv).is_ok() => {}
                _ => {
                    warn!("Illegal move {:?} in position command", mv_str);
                    return UciInput::Unknown(input.to_string());
                }
            }
        }

        UciInput::Position(Box::new(board))
    }

    fn decode_setoption(&self, input: &str) -> UciInput {
        // Parse: setoption name <name> [value <value>]
        // Value is optional (button-type options have no value)
        let Some(rest) = input.strip_prefix("setoption name ") else {
            // Missing "name" keyword - return empty name for error handling
            return UciInput::SetOption {
                name: String::new(),
                value: String::new(),
            };
        };

        let (name, value) = match rest.split_once(" value ") {
            Some((n, v)) => (n.trim(), v.trim()),
            None => (rest.trim(), ""),
        };

        UciInput::SetOption {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn decode_go(&self, input: &str) -> UciInput {
        UciInput::Go(GoParams {
            infinite: input.split_whitespace().any(|t| t == "infinite"),
            search_moves: extract_search_moves(input),
            wtime: extract_numeric_param(input, "wtime"),
            btime: extract_numeric_param(input, "btime"),
            winc: extract_numeric_param(input, "winc"),
            binc: extract_numeric_param(input, "binc"),
            moves_to_go: extract_numeric_param(input, "movestogo"),
            depth: extract_numeric_param(input, "depth").and_then(|d| u8::try_from(d).ok()),
            move_time: extract_numeric_param(input, "movetime"),
        })
    }

    fn decode_bestmove(&self, line: &str) -> UciOutput {
        let mut tokens = line.split_whitespace().skip(1);
        let best_move = tokens.next().unwrap_or_default().to_string();

        let ponder = match (tokens.next(), tokens.next()) {
            (Some("ponder"), Some(mv)) => Some(mv.to_string()),
            _ => None,
        };

        UciOutput::BestMove { best_move, ponder }
    }

    fn decode_info(&self, line: &str) -> Info {
        let tokens: Vec<&str> = line.split_whitespace().skip(1).collect();
        let mut info = Info::default();

        let mut i = 0;
        while i < tokens.len() {
            let next = tokens.get(i + 1).copied();
            match tokens[i] {
                "depth" => info.depth = next.and_then(|v| v.parse().ok()),
                "seldepth" => info.sel_depth = next.and_then(|v| v.parse().ok()),
                "nodes" => info.nodes = next.and_then(|v| v.parse().ok()),
                "nps" => info.nodes_per_second = next.and_then(|v| v.parse().ok()),
                "time" => info.time = next.and_then(|v| v.parse().ok()),
                "score" => {
                    let value = tokens.get(i + 2).and_then(|v| v.parse::<i32>().ok());
                    info.score = match (next, value) {
                        (Some("cp"), Some(cp)) => Some(Score::Centipawns(cp)),
                        (Some("mate"), Some(moves)) => Some(Score::Mate(moves)),
                        _ => None,
                    };
                    i += 3;
                    continue;
                }
                "pv" => {
                    info.pv = tokens[i + 1..].iter().map(|s| s.to_string()).collect();
                    break;
                }
                _ => {
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        info
    }
}

fn extract_numeric_param(input: &str, param: &str) -> Option<u64> {
    input
        .split_whitespace()
        .collect::<Vec<&str>>()
        .windows(2)
        .find(|w| w[0] == param)
        .and_then(|w| w[1].parse().ok())
}

fn extract_search_moves(input: &str) -> Option<Vec<String>> {
    let moves: Vec<String> = input
        .split_whitespace()
        .skip_while(|t| *t != "searchmoves")
        .skip(1)
        .take_while(|t| !GO_KEYWORDS.contains(t))
        .map(str::to_string)
        .collect();

    if moves.is_empty() {
        None
    } else {
        Some(moves)
    }
}
