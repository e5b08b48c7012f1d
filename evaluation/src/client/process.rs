use std::io::{BufRead, BufReader, BufWriter, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use cozy_chess::Board;
use log::debug;
use uci::{Decoder, Encoder, GoParams, Score, UciInput, UciOutput};

use super::EngineSettings;
use crate::EvaluationError;

const QUIT_WAIT: Duration = Duration::from_millis(100);

/// What the engine printed for one `go`.
#[derive(Debug)]
pub struct SearchReply {
    pub best_move: String,
    /// Last score reported before `bestmove`.
    pub score: Option<Score>,
}

/// A running UCI engine. Stdout is drained by a reader thread so every read
/// can be bounded by a deadline.
pub struct EngineProcess {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    lines: Receiver<String>,
    encoder: Encoder,
    decoder: Decoder,
}

impl EngineProcess {
    pub fn spawn(settings: &EngineSettings) -> Result<Self, EvaluationError> {
        let mut child = Command::new(&settings.path)
            .args(&settings.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EvaluationError::Spawn {
                path: settings.path.display().to_string(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or(EvaluationError::Disconnected)?;
        let stdout = child.stdout.take().ok_or(EvaluationError::Disconnected)?;

        let (tx, rx) = channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            child,
            stdin: BufWriter::new(stdin),
            lines: rx,
            encoder: Encoder {},
            decoder: Decoder::new(),
        })
    }

    /// `uci`/`uciok`, the configured options, then `isready`/`readyok`.
    pub fn handshake(
        &mut self,
        options: &[(String, String)],
        timeout: Duration,
    ) -> Result<(), EvaluationError> {
        let deadline = Instant::now() + timeout;

        self.send(&UciInput::Uci)?;
        self.wait_for(deadline, |output| matches!(output, UciOutput::UciOk))?;

        for (name, value) in options {
            self.send(&UciInput::SetOption {
                name: name.clone(),
                value: value.clone(),
            })?;
        }

        self.sync(deadline)
    }

    pub fn new_game(&mut self, timeout: Duration) -> Result<(), EvaluationError> {
        self.send(&UciInput::UciNewGame)?;
        self.sync(Instant::now() + timeout)
    }

    /// One search round trip: position, go, read until bestmove.
    pub fn go(
        &mut self,
        board: &Board,
        params: GoParams,
        deadline: Instant,
    ) -> Result<SearchReply, EvaluationError> {
        self.send(&UciInput::Position(Box::new(board.clone())))?;
        self.send(&UciInput::Go(params))?;

        let mut score = None;
        loop {
            match self.receive(deadline)? {
                UciOutput::Info(info) => {
                    if info.score.is_some() {
                        score = info.score;
                    }
                }
                UciOutput::BestMove { best_move, .. } => {
                    return Ok(SearchReply { best_move, score });
                }
                _ => {}
            }
        }
    }

    fn sync(&mut self, deadline: Instant) -> Result<(), EvaluationError> {
        self.send(&UciInput::IsReady)?;
        self.wait_for(deadline, |output| matches!(output, UciOutput::ReadyOk))
    }

    fn wait_for<F>(&mut self, deadline: Instant, done: F) -> Result<(), EvaluationError>
    where
        F: Fn(&UciOutput) -> bool,
    {
        loop {
            if done(&self.receive(deadline)?) {
                return Ok(());
            }
        }
    }

    fn send(&mut self, command: &UciInput) -> Result<(), EvaluationError> {
        let line = self.encoder.encode_input(command);
        debug!("Engine <- {}", line);

        writeln!(self.stdin, "{}", line)?;
        self.stdin.flush()?;
        Ok(())
    }

    fn receive(&mut self, deadline: Instant) -> Result<UciOutput, EvaluationError> {
        let timeout = deadline.saturating_duration_since(Instant::now());

        match self.lines.recv_timeout(timeout) {
            Ok(line) => {
                debug!("Engine -> {}", line);
                Ok(self.decoder.decode_output(line.trim()))
            }
            Err(RecvTimeoutError::Timeout) => Err(EvaluationError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(EvaluationError::Disconnected),
        }
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        // Ask politely first, then make sure the process is gone.
        let asked = self
            .stdin
            .write_all(b"quit\n")
            .and_then(|_| self.stdin.flush())
            .is_ok();

        if asked {
            let deadline = Instant::now() + QUIT_WAIT;
            while Instant::now() < deadline {
                if let Ok(Some(_)) = self.child.try_wait() {
                    return;
                }
                thread::sleep(Duration::from_millis(5));
            }
        }

        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
