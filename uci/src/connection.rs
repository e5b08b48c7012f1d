use super::commands::UciOutput;
use super::encoder::Encoder;
use log::debug;
use std::io::{self, Write};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Stdout side of a UCI session. Outputs are queued on a channel and printed
/// by a dedicated thread so the worker never blocks on the GUI.
pub struct UciConnection {
    output_tx: Sender<UciOutput>,
}

impl Default for UciConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl UciConnection {
    pub fn new() -> Self {
        let (output_tx, output_rx) = channel();

        Self::spawn_output_handler(output_rx);

        Self { output_tx }
    }

    pub fn output_sender(&self) -> Sender<UciOutput> {
        self.output_tx.clone()
    }

    fn spawn_output_handler(output_rx: Receiver<UciOutput>) {
        thread::spawn(move || {
            let encoder = Encoder {};
            let stdout = io::stdout();

            while let Ok(output) = output_rx.recv() {
                let out_line = encoder.encode(&output);
                debug!("Output: {:?}", out_line);

                let mut handle = stdout.lock();
                if writeln!(handle, "{}", out_line)
                    .and_then(|_| handle.flush())
                    .is_err()
                {
                    break;
                }
            }
        });
    }
}
