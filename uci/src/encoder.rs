use super::commands::{GoParams, Info, Score, UciInput, UciOutput};

pub struct Encoder {}

impl Encoder {
    /// Encodes a line the bot prints to its GUI.
    pub fn encode(&self, response: &UciOutput) -> String {
        match response {
            UciOutput::IdName(name) => format!("id name {}", name),
            UciOutput::IdAuthor(author) => format!("id author {}", author),

            UciOutput::UciOk => "uciok".to_string(),
            UciOutput::ReadyOk => "readyok".to_string(),

            UciOutput::BestMove { best_move, ponder } => match ponder {
                Some(ponder) => format!("bestmove {} ponder {}", best_move, ponder),
                None => format!("bestmove {}", best_move),
            },
            UciOutput::Info(info) => encode_info(info),
            UciOutput::InfoString(message) => format!("info string {}", message),
            UciOutput::Option(option_str) => option_str.clone(),
            UciOutput::Raw(message) => message.clone(),
        }
    }

    /// Encodes a command the bot sends to the external engine.
    pub fn encode_input(&self, command: &UciInput) -> String {
        match command {
            UciInput::Uci => "uci".to_string(),
            UciInput::Debug(on) => format!("debug {}", if *on { "on" } else { "off" }),
            UciInput::IsReady => "isready".to_string(),
            UciInput::UciNewGame => "ucinewgame".to_string(),
            UciInput::Position(board) => format!("position fen {}", board),
            UciInput::Go(params) => encode_go(params),
            UciInput::Stop => "stop".to_string(),
            UciInput::Quit => "quit".to_string(),
            UciInput::SetOption { name, value } if value.is_empty() => {
                format!("setoption name {}", name)
            }
            UciInput::SetOption { name, value } => {
                format!("setoption name {} value {}", name, value)
            }
            UciInput::Unknown(line) => line.clone(),
        }
    }
}

fn encode_info(info: &Info) -> String {
    let mut parts = vec!["info".to_string()];

    let numeric = [
        ("depth", info.depth.map(u64::from)),
        ("seldepth", info.sel_depth.map(u64::from)),
        ("nodes", info.nodes),
        ("nps", info.nodes_per_second),
        ("time", info.time),
    ];
    for (name, value) in numeric {
        if let Some(value) = value {
            parts.push(format!("{} {}", name, value));
        }
    }

    match info.score {
        Some(Score::Centipawns(cp)) => parts.push(format!("score cp {}", cp)),
        Some(Score::Mate(moves)) => parts.push(format!("score mate {}", moves)),
        None => {}
    }

    if !info.pv.is_empty() {
        parts.push(format!("pv {}", info.pv.join(" ")));
    }

    parts.join(" ")
}

fn encode_go(params: &GoParams) -> String {
    let mut parts = vec!["go".to_string()];

    if let Some(moves) = &params.search_moves {
        parts.push(format!("searchmoves {}", moves.join(" ")));
    }

    let numeric = [
        ("wtime", params.wtime),
        ("btime", params.btime),
        ("winc", params.winc),
        ("binc", params.binc),
        ("movestogo", params.moves_to_go),
        ("depth", params.depth.map(u64::from)),
        ("movetime", params.move_time),
    ];
    for (name, value) in numeric {
        if let Some(value) = value {
            parts.push(format!("{} {}", name, value));
        }
    }

    if params.infinite {
        parts.push("infinite".to_string());
    }

    parts.join(" ")
}
