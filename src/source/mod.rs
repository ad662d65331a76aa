//! View content sources.
//!
//! A [`Loader`] delivers the output of a history command (or piped stdin, or
//! a fixed text) to a view without ever blocking the event loop:
//! - A reader thread per stream pushes raw byte chunks over a channel
//! - [`Loader::read_available`] drains a bounded number of chunks per call
//! - [`LineSplitter`] reassembles lines across chunk boundaries

use crate::model::error::LoadError;
use std::io::{self, Read};
use std::process::{Child, Stdio};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub mod command;
pub mod lines;
pub mod stdin;

pub use lines::LineSplitter;

/// Upper bound on chunks consumed by one [`Loader::read_available`] call.
pub const MAX_CHUNKS_PER_PUMP: usize = 64;

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Message sent from a reader thread.
#[derive(Debug)]
enum Chunk {
    Data(Vec<u8>),
    Eof,
    Failed(io::Error),
}

/// Outcome of draining a loader.
#[derive(Debug)]
pub enum LoadStatus {
    /// More output may still arrive.
    Pending,
    /// The source reached end of input.
    Exhausted,
    /// The source broke or the command failed. Lines read so far are kept.
    Failed(LoadError),
}

/// Incremental, non-blocking reader for one view's content.
///
/// Dropping a loader terminates its child process (if any) and reaps it, so
/// ending a load is just dropping the loader.
#[derive(Debug)]
pub struct Loader {
    label: String,
    rx: Receiver<Chunk>,
    child: Option<Child>,
    splitter: LineSplitter,
    started: Instant,
    finished: bool,
}

impl Loader {
    /// Start `command_line` under `sh -c` and stream its standard output.
    pub fn spawn(command_line: &str) -> Result<Self, LoadError> {
        let spawn_error = |source| LoadError::Spawn {
            command: command_line.to_string(),
            source,
        };

        let mut child = command::shell(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_error)?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(spawn_error(io::Error::other("child has no stdout pipe")));
        };

        let (tx, rx) = mpsc::channel();
        if let Err(source) = spawn_reader(command_line, stdout, tx) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(spawn_error(source));
        }

        debug!(command = command_line, pid = child.id(), "Started loader");
        Ok(Self::with_channel(command_line, rx, Some(child)))
    }

    /// Stream any reader, typically piped stdin.
    pub fn from_reader<R>(label: &str, reader: R) -> Result<Self, LoadError>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        spawn_reader(label, reader, tx).map_err(|source| LoadError::Spawn {
            command: label.to_string(),
            source,
        })?;
        Ok(Self::with_channel(label, rx, None))
    }

    /// A loader whose whole content is already known.
    ///
    /// The channel is filled up front, so the first drain completes it.
    pub fn from_bytes(label: &str, bytes: Vec<u8>) -> Self {
        let (tx, rx) = mpsc::channel();
        // The receiver is alive for both sends.
        let _ = tx.send(Chunk::Data(bytes));
        let _ = tx.send(Chunk::Eof);
        Self::with_channel(label, rx, None)
    }

    fn with_channel(label: &str, rx: Receiver<Chunk>, child: Option<Child>) -> Self {
        Self {
            label: label.to_string(),
            rx,
            child,
            splitter: LineSplitter::new(),
            started: Instant::now(),
            finished: false,
        }
    }

    /// Command line or description of what is being read.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Time since the loader was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Append every complete line currently available to `lines`.
    ///
    /// Consumes at most [`MAX_CHUNKS_PER_PUMP`] chunks and never waits for
    /// more. On end of input any unterminated final line is flushed too.
    /// After `Exhausted` or `Failed` has been returned once, later calls
    /// return `Exhausted` and add nothing.
    pub fn read_available(&mut self, lines: &mut Vec<String>) -> LoadStatus {
        if self.finished {
            return LoadStatus::Exhausted;
        }

        for _ in 0..MAX_CHUNKS_PER_PUMP {
            match self.rx.try_recv() {
                Ok(Chunk::Data(bytes)) => lines.extend(self.splitter.push(&bytes)),
                Ok(Chunk::Eof) | Err(TryRecvError::Disconnected) => {
                    self.flush(lines);
                    return self.check_exit();
                }
                Ok(Chunk::Failed(err)) => {
                    warn!(source = %self.label, error = %err, "Read failed");
                    self.flush(lines);
                    return LoadStatus::Failed(LoadError::Stream(err));
                }
                Err(TryRecvError::Empty) => break,
            }
        }
        LoadStatus::Pending
    }

    fn flush(&mut self, lines: &mut Vec<String>) {
        self.finished = true;
        lines.extend(self.splitter.finish());
    }

    /// Reap the child after its output closed and report a failing exit.
    fn check_exit(&mut self) -> LoadStatus {
        let Some(mut child) = self.child.take() else {
            return LoadStatus::Exhausted;
        };
        match child.wait() {
            Ok(status) if status.success() => LoadStatus::Exhausted,
            Ok(status) => LoadStatus::Failed(LoadError::Exited {
                command: self.label.clone(),
                status,
            }),
            Err(err) => LoadStatus::Failed(LoadError::Stream(err)),
        }
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            debug!(command = %self.label, "Stopping loader");
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

fn spawn_reader<R>(label: &str, mut reader: R, tx: Sender<Chunk>) -> io::Result<()>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name(format!("reader: {label}"))
        .spawn(move || {
            let mut buf = vec![0u8; READ_CHUNK_SIZE];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => {
                        let _ = tx.send(Chunk::Eof);
                        break;
                    }
                    Ok(n) => {
                        // Receiver gone means the load was ended.
                        if tx.send(Chunk::Data(buf[..n].to_vec())).is_err() {
                            break;
                        }
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => {
                        let _ = tx.send(Chunk::Failed(err));
                        break;
                    }
                }
            }
        })
        .map(|_| ())
}
