use crate::error::TowerError;
use crate::tower::{Feedback, Tower};
use std::io::BufRead;
use std::io::BufReader;
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Applies every non-blank line from `reader` to the tower.
/// Returns the number of lines applied once the reader hits EOF.
///
/// Bytes that are not UTF-8 are replaced rather than rejected, so a garbled
/// line shows up as free text and the connection keeps going.
pub fn consume<R, F>(mut reader: R, tower: &Tower, mut on_feedback: F) -> Result<usize, TowerError>
where
    R: BufRead,
    F: FnMut(Feedback),
{
    let mut applied = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(applied);
        }
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }
        on_feedback(tower.apply_incoming_line(&line));
        applied += 1;
    }
}

/// TCP client for the controller's state feed, reconnecting forever.
pub struct FeedClient {
    addr: String,
    reconnect_delay: Duration,
}

impl FeedClient {
    pub fn new(addr: impl Into<String>, reconnect_delay: Duration) -> FeedClient {
        FeedClient {
            addr: addr.into(),
            reconnect_delay,
        }
    }

    /// Tower state survives any number of disconnects.
    pub fn run<F>(&self, tower: &Tower, stop: &AtomicBool, mut on_feedback: F)
    where
        F: FnMut(Feedback),
    {
        while !stop.load(Ordering::Acquire) {
            let stream = match TcpStream::connect(&self.addr) {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(addr = %self.addr, error = %e, "failed to connect to state feed");
                    thread::sleep(self.reconnect_delay);
                    continue;
                }
            };
            info!(addr = %self.addr, "connected to state feed");

            match consume(BufReader::new(stream), tower, &mut on_feedback) {
                Ok(lines) => info!(lines = lines, "connection closed by server"),
                Err(e) => warn!(error = %e, "error reading from state feed"),
            }
        }
    }
}
