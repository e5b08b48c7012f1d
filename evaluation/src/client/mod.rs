use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use cozy_chess::{util::parse_uci_move, Board, Move};
use log::{debug, info, warn};
use uci::{moves_to_uci, GoParams, NULL_MOVE};
use utils::{has_check, has_legal_moves};

use crate::{BestMove, Evaluation, EvaluationError, Evaluator};

mod process;

use process::{EngineProcess, SearchReply};

const DEFAULT_GRACE: Duration = Duration::from_millis(500);
const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// How to launch and talk to the external engine.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub path: PathBuf,
    pub args: Vec<String>,
    /// Sent as `setoption` during every handshake.
    pub options: Vec<(String, String)>,
    /// Extra time allowed past the requested search time before giving up.
    pub grace: Duration,
    pub handshake_timeout: Duration,
}

impl EngineSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
            options: Vec::new(),
            grace: DEFAULT_GRACE,
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }
}

/// Evaluator backed by one long-lived UCI engine process.
///
/// The session sits behind a mutex, so concurrent callers are serialised
/// and request/response pairs never interleave. A session that fails is
/// discarded; when the process itself died, one fresh process is started
/// and the request retried before the error is returned.
pub struct EngineClient {
    settings: EngineSettings,
    session: Mutex<Option<EngineProcess>>,
    closed: AtomicBool,
    round_trips: AtomicU64,
}

impl EngineClient {
    /// Starts the engine and completes the UCI handshake.
    pub fn spawn(settings: EngineSettings) -> Result<Self, EvaluationError> {
        let process = start(&settings)?;
        info!("Engine {} ready", settings.path.display());

        Ok(Self {
            settings,
            session: Mutex::new(Some(process)),
            closed: AtomicBool::new(false),
            round_trips: AtomicU64::new(0),
        })
    }

    /// Number of completed search round trips.
    pub fn round_trips(&self) -> u64 {
        self.round_trips.load(Ordering::Relaxed)
    }

    /// Shuts the engine down. Later calls fail with `EvaluationError::Closed`.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        let process = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(process);

        info!("Engine {} closed", self.settings.path.display());
    }

    fn ensure_open(&self) -> Result<(), EvaluationError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(EvaluationError::Closed);
        }
        Ok(())
    }

    fn search(
        &self,
        board: &Board,
        params: GoParams,
        time: Duration,
    ) -> Result<SearchReply, EvaluationError> {
        let reply = self.with_session(|process| {
            let deadline = Instant::now() + time + self.settings.grace;
            process.go(board, params.clone(), deadline)
        })?;

        self.round_trips.fetch_add(1, Ordering::Relaxed);
        Ok(reply)
    }

    fn with_session<T, F>(&self, mut request: F) -> Result<T, EvaluationError>
    where
        F: FnMut(&mut EngineProcess) -> Result<T, EvaluationError>,
    {
        self.ensure_open()?;
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        // close() may have run while we waited for the lock
        self.ensure_open()?;

        let result = match session.as_mut() {
            Some(process) => request(process),
            None => Err(EvaluationError::Disconnected),
        };

        match result {
            Ok(value) => Ok(value),
            Err(e) if e.is_disconnect() => {
                warn!("Engine session lost ({}), restarting", e);
                *session = None;

                let mut process = start(&self.settings)?;
                let retried = request(&mut process);
                if retried.is_ok() {
                    *session = Some(process);
                }
                retried
            }
            Err(e) => {
                debug!("Discarding engine session after: {}", e);
                *session = None;
                Err(e)
            }
        }
    }
}

impl Evaluator for EngineClient {
    fn name(&self) -> String {
        self.settings
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| self.settings.path.display().to_string())
    }

    fn evaluate(&self, board: &Board, slice: Duration) -> Result<Evaluation, EvaluationError> {
        self.ensure_open()?;
        let millis = to_millis(slice)?;

        // Terminal positions have nothing to search.
        if !has_legal_moves(board) {
            return Ok(if has_check(board) {
                Evaluation::mated()
            } else {
                Evaluation::DRAW
            });
        }

        let params = GoParams {
            move_time: Some(millis),
            ..Default::default()
        };
        let reply = self.search(board, params, slice)?;

        reply.score.map(Evaluation::from).ok_or_else(|| {
            EvaluationError::Malformed(format!("no score before bestmove {}", reply.best_move))
        })
    }

    fn best_move(
        &self,
        board: &Board,
        time: Duration,
        search_moves: Option<&[Move]>,
    ) -> Result<BestMove, EvaluationError> {
        self.ensure_open()?;
        let millis = to_millis(time)?;

        let params = GoParams {
            move_time: Some(millis),
            search_moves: search_moves.map(|moves| moves_to_uci(board, moves)),
            ..Default::default()
        };
        let reply = self.search(board, params, time)?;

        if reply.best_move == NULL_MOVE || reply.best_move == "(none)" {
            return Err(EvaluationError::Malformed(format!(
                "engine returned no move ({})",
                reply.best_move
            )));
        }

        let mv = parse_uci_move(board, &reply.best_move)
            .ok()
            .filter(|&mv| board.is_legal(mv))
            .ok_or_else(|| {
                EvaluationError::Malformed(format!("illegal bestmove {}", reply.best_move))
            })?;

        Ok(BestMove {
            mv,
            evaluation: reply.score.map(Evaluation::from),
        })
    }

    fn new_game(&self) -> Result<(), EvaluationError> {
        let timeout = self.settings.handshake_timeout;
        self.with_session(|process| process.new_game(timeout))
    }

    fn close(&self) {
        EngineClient::close(self);
    }
}

impl Drop for EngineClient {
    fn drop(&mut self) {
        self.close();
    }
}

fn start(settings: &EngineSettings) -> Result<EngineProcess, EvaluationError> {
    let mut process = EngineProcess::spawn(settings)?;
    process.handshake(&settings.options, settings.handshake_timeout)?;
    Ok(process)
}

fn to_millis(time: Duration) -> Result<u64, EvaluationError> {
    match u64::try_from(time.as_millis()) {
        Ok(0) => Err(EvaluationError::ZeroSlice),
        Ok(millis) => Ok(millis),
        Err(_) => Ok(u64::MAX),
    }
}
