//! Off-thread parsing.
//!
//! Parsing runs on its own thread and talks to the orchestrator only through
//! an ordered event channel: zero or more progress notifications, then
//! exactly one terminal event (success or error). No shared mutable state
//! crosses the boundary, so a worker crash can only surface as an error
//! event or as channel disconnection, which callers treat the same way.

use crate::data::csv_parser::{ParseOptions, check_file_size, parse_csv_content};
use crate::data::error::{DataError, DataResult};
use crate::types::{ParseEvent, RawTable};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;
use tracing::{debug, warn};

/// Handle to an in-flight parse.
///
/// Consume events with [`recv`](Self::recv) or drain to the terminal outcome
/// with [`wait`](Self::wait). Dropping the handle detaches the worker; it
/// finishes its work and exits on its own.
pub struct ParseJob {
    receiver: Receiver<ParseEvent>,
    handle: Option<JoinHandle<()>>,
}

impl ParseJob {
    /// Next event from the worker, blocking.
    ///
    /// A disconnected channel before a terminal event means the worker died
    /// abnormally and is reported as [`DataError::Channel`].
    pub fn recv(&self) -> DataResult<ParseEvent> {
        self.receiver
            .recv()
            .map_err(|_| DataError::Channel("parse worker disconnected".to_string()))
    }

    /// Drain events until the terminal one and return its payload.
    ///
    /// Progress events are logged and discarded; use [`recv`](Self::recv)
    /// when the caller wants to forward them.
    pub fn wait(mut self) -> DataResult<RawTable> {
        let outcome = loop {
            match self.receiver.recv() {
                Ok(ParseEvent::Progress { progress, message }) => {
                    debug!(progress, %message, "parse progress");
                }
                Ok(ParseEvent::Success { data }) => break Ok(data),
                Ok(ParseEvent::Error { error }) => break Err(error),
                Err(_) => break Err(self.channel_failure()),
            }
        };
        self.join();
        outcome
    }

    /// Inspect the channel after disconnection: a panicked thread and a
    /// silently-exited thread both count as channel failure.
    fn channel_failure(&mut self) -> DataError {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("parse worker panicked");
                return DataError::Channel("parse worker panicked".to_string());
            }
        }
        DataError::Channel("parse worker disconnected".to_string())
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Spawn a worker that parses `bytes` as CSV text.
///
/// The returned job yields progress at the fixed checkpoints 0, 30, 60 and
/// 90 percent, then one terminal event.
pub fn spawn_parse(bytes: Vec<u8>, file_name: String, options: ParseOptions) -> ParseJob {
    let (sender, receiver) = channel();

    let handle = std::thread::Builder::new()
        .name("csv-parse".to_string())
        .spawn(move || run_parse(bytes, file_name, options, sender))
        .expect("failed to spawn parse worker thread");

    ParseJob {
        receiver,
        handle: Some(handle),
    }
}

fn run_parse(bytes: Vec<u8>, file_name: String, options: ParseOptions, sender: Sender<ParseEvent>) {
    // A closed receiver means the orchestrator lost interest; stop quietly.
    let send = |event: ParseEvent| sender.send(event).is_ok();

    if let Err(error) = check_file_size(bytes.len() as u64, &options) {
        send(ParseEvent::Error { error });
        return;
    }

    if !send(progress(0, "Reading file...")) {
        return;
    }

    let content = String::from_utf8_lossy(&bytes);

    if !send(progress(30, "Parsing CSV...")) {
        return;
    }

    let table = match parse_csv_content(&content, &file_name, &options) {
        Ok(table) => table,
        Err(error) => {
            send(ParseEvent::Error { error });
            return;
        }
    };

    if !send(progress(60, "Processing data...")) {
        return;
    }

    if !send(progress(90, "Finalizing...")) {
        return;
    }

    send(ParseEvent::Success { data: table });
}

fn progress(progress: u8, message: &str) -> ParseEvent {
    ParseEvent::Progress {
        progress,
        message: message.to_string(),
    }
}
