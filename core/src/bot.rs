//! UCI application - handles the protocol and hands decisions to the bot worker.

use std::io::BufRead;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, warn};
use selector::{MoveSelector, SelectorConfig};
use uci::{Decoder, UciConnection, UciInput, UciOutput};

use crate::report::ReportFile;
use crate::worker::{BotCommand, BotWorker};

const BOT_NAME: &str = "Fickle";
const BOT_VERSION: &str = env!("CARGO_PKG_VERSION");
const BOT_AUTHOR: &str = "Fickle contributors";

pub struct Fickle {
    config: SelectorConfig,
    cmd_tx: Sender<BotCommand>,
    output: Sender<UciOutput>,
    worker_handle: JoinHandle<()>,
}

impl Fickle {
    /// Starts the worker thread that owns `selector`.
    pub fn new(
        config: SelectorConfig,
        selector: MoveSelector,
        report_file: Option<ReportFile>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        let uci = UciConnection::new();
        let output = uci.output_sender();

        let worker = BotWorker::new(selector, cmd_rx, output.clone(), report_file);
        let worker_handle = thread::spawn(move || worker.run());

        Self {
            config,
            cmd_tx,
            output,
            worker_handle,
        }
    }

    /// Runs the UCI protocol loop until quit or end of input.
    pub fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        let decoder = Decoder::new();
        let stdin = std::io::stdin();

        for line in stdin.lock().lines() {
            let line = line?;
            debug!("Input: {:?}", line.trim());

            let input = decoder.decode(line.trim());
            if !self.handle(input) {
                break;
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Handles a single UCI input. Returns false if we should quit.
    fn handle(&mut self, input: UciInput) -> bool {
        match input {
            UciInput::Uci => {
                let _ = self
                    .output
                    .send(UciOutput::IdName(format!("{} {}", BOT_NAME, BOT_VERSION)));
                let _ = self.output.send(UciOutput::IdAuthor(BOT_AUTHOR.to_string()));
                let _ = self.config.to_uci(&self.output);
                let _ = self.output.send(UciOutput::UciOk);
            }
            UciInput::Debug(on) => debug!("Debug mode {}", if on { "on" } else { "off" }),
            UciInput::IsReady => {
                let _ = self.output.send(UciOutput::ReadyOk);
            }
            UciInput::SetOption { name, value } => {
                if let Err(e) = self.config.update_from_uci(&name, &value) {
                    warn!("Option setting failed: {}", e);
                    let _ = self
                        .output
                        .send(UciOutput::InfoString(format!("error: {}", e)));
                } else {
                    debug!("Set option '{}' to '{}'", name, value);
                    let _ = self
                        .cmd_tx
                        .send(BotCommand::Configure(Box::new(self.config.clone())));
                }
            }
            UciInput::UciNewGame => {
                let _ = self.cmd_tx.send(BotCommand::NewGame);
            }
            UciInput::Position(board) => {
                let _ = self.cmd_tx.send(BotCommand::SetPosition(*board));
            }
            UciInput::Go(params) => {
                let _ = self.cmd_tx.send(BotCommand::Go(params));
            }
            // A selection runs to completion; its move is still sent.
            UciInput::Stop => debug!("Stop received"),
            UciInput::Quit => return false,
            UciInput::Unknown(line) if line.starts_with("position") => {
                warn!("Rejected position, keeping the previous board: {}", line);
                let _ = self.output.send(UciOutput::InfoString(format!(
                    "error: invalid position command: {}",
                    line
                )));
            }
            UciInput::Unknown(line) => debug!("Unknown command: {}", line),
        }
        true
    }

    fn shutdown(self) {
        let _ = self.cmd_tx.send(BotCommand::Quit);
        let _ = self.worker_handle.join();
    }
}
