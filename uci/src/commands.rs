use cozy_chess::Board;

/// Commands flowing from a GUI to an engine.
///
/// The bot decodes these from its own stdin and encodes them when talking
/// to the external evaluation engine.
#[derive(Debug, Clone, PartialEq)]
pub enum UciInput {
    Uci,
    Debug(bool),
    IsReady,

    UciNewGame,
    Position(Box<Board>),
    Go(GoParams),

    Stop,
    Quit,
    SetOption {
        name: String,
        value: String,
    },
    Unknown(String),
}

/// Lines flowing from an engine to a GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UciOutput {
    IdName(String),
    IdAuthor(String),
    UciOk,
    ReadyOk,
    BestMove {
        best_move: String,
        ponder: Option<String>,
    },
    Info(Info),
    InfoString(String),
    Option(String),
    Raw(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    pub depth: Option<u8>,
    pub sel_depth: Option<u8>,
    pub nodes: Option<u64>,
    pub nodes_per_second: Option<u64>,
    pub time: Option<u64>,
    pub pv: Vec<String>,
    pub score: Option<Score>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Centipawns(i32), // centipawns
    Mate(i32),       // Positive for mate-in-n, negative for mated-in-n
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    // Search in the background until a stop command is received.
    pub infinite: bool,

    // Restrict search to moves in this list.
    pub search_moves: Option<Vec<String>>,

    // Integer of milliseconds White has left on the clock.
    pub wtime: Option<u64>,

    // Integer of milliseconds Black has left on the clock.
    pub btime: Option<u64>,

    // Integer of white Fisher increment.
    pub winc: Option<u64>,

    // Integer of black Fisher increment.
    pub binc: Option<u64>,

    // Number of moves to the next time control. If this is not set, but wtime or btime are, then it is sudden death.
    pub moves_to_go: Option<u64>,

    // Search depth ply only.
    pub depth: Option<u8>,

    // Search exactly movetime milliseconds.
    pub move_time: Option<u64>,
}
