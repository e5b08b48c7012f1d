use std::sync::mpsc::{Receiver, Sender};

use cozy_chess::Board;
use log::{info, warn};
use selector::{MoveSelector, SelectorConfig, TimeControl};
use uci::{move_to_uci, parse_moves, GoParams, UciOutput, NULL_MOVE};

use crate::report::ReportFile;

/// Commands sent from the UCI thread to the bot worker.
pub enum BotCommand {
    /// Rebuild the strategy from updated options.
    Configure(Box<SelectorConfig>),
    /// Tell the evaluation engine a new game starts.
    NewGame,
    /// Set the position to move from.
    SetPosition(Board),
    /// Pick a move for the current position.
    Go(GoParams),
    /// Close the engine and stop the worker.
    Quit,
}

/// Owns the move selector and answers commands on a dedicated thread, so
/// the UCI loop keeps reading input while the engine is consulted.
pub struct BotWorker {
    selector: MoveSelector,
    board: Board,
    rx: Receiver<BotCommand>,
    output: Sender<UciOutput>,
    report_file: Option<ReportFile>,
}

impl BotWorker {
    pub fn new(
        selector: MoveSelector,
        rx: Receiver<BotCommand>,
        output: Sender<UciOutput>,
        report_file: Option<ReportFile>,
    ) -> Self {
        Self {
            selector,
            board: Board::default(),
            rx,
            output,
            report_file,
        }
    }

    /// Main loop: process commands until Quit is received or the sender is gone.
    pub fn run(mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                BotCommand::Go(params) => self.go(&params),
                BotCommand::SetPosition(board) => {
                    self.board = board;
                }
                BotCommand::NewGame => {
                    if let Err(e) = self.selector.evaluator().new_game() {
                        warn!("Engine new game failed: {}", e);
                    }
                }
                BotCommand::Configure(config) => {
                    if let Err(e) = self.selector.configure(&config) {
                        warn!("Configuration rejected: {}", e);
                    }
                }
                BotCommand::Quit => break,
            }
        }

        self.selector.evaluator().close();
    }

    fn go(&mut self, params: &GoParams) {
        let time_control = TimeControl::from_go(params, self.board.side_to_move());
        let restrict_to = params
            .search_moves
            .as_ref()
            .map(|moves| parse_moves(&self.board, moves));

        // UCI carries no draw offers, so every game is played out.
        let result = self
            .selector
            .select_move(&self.board, time_control, false, restrict_to.as_deref());

        // UCI requires bestmove for every "go", even when no move was found.
        let best_move = match result {
            Ok(selection) => {
                if let Some(file) = &self.report_file {
                    if let Err(e) = file.record(&selection.report) {
                        warn!("Could not write report file: {}", e);
                    }
                }

                let _ = self
                    .output
                    .send(UciOutput::InfoString(selection.report.to_string()));
                move_to_uci(&self.board, selection.mv)
            }
            Err(e) => {
                warn!("No move selected: {}", e);
                let _ = self.output.send(UciOutput::InfoString(format!("error: {}", e)));
                NULL_MOVE.to_string()
            }
        };

        info!("Playing {}", best_move);
        let _ = self.output.send(UciOutput::BestMove {
            best_move,
            ponder: None,
        });
    }
}
