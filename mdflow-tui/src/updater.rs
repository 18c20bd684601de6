//! Debounced streaming content pipeline
//!
//! Live sources (an editor surface, a file watcher, a token stream) push
//! full document text as fast as it changes. Re-parsing and re-rendering on
//! every push is wasted work, so pushes are coalesced: a settled value is
//! delivered only after a quiescence window elapses with no newer push.
//! Intermediate values that were superseded inside the window are never
//! delivered.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use log::{debug, trace};
use std::thread;
use std::time::{Duration, Instant};

/// Handle to the debounce worker
pub struct ContentUpdater {
    input_tx: Sender<String>,
    settled_rx: Receiver<String>,
    _worker_thread: thread::JoinHandle<()>,
}

impl ContentUpdater {
    /// Spawn an updater with the given quiescence window
    pub fn spawn(window: Duration) -> Self {
        let (input_tx, input_rx) = crossbeam_channel::unbounded();
        let (settled_tx, settled_rx) = crossbeam_channel::unbounded();

        let worker_thread = thread::spawn(move || {
            worker_loop(input_rx, settled_tx, window);
        });

        Self {
            input_tx,
            settled_rx,
            _worker_thread: worker_thread,
        }
    }

    /// Record `text` as the newest pending content, superseding any
    /// not-yet-delivered value, and restart the quiescence window
    pub fn push(&self, text: String) {
        let _ = self.input_tx.send(text);
    }

    /// Try to receive a settled value (non-blocking)
    pub fn try_recv_settled(&self) -> Option<String> {
        self.settled_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for a settled value
    pub fn recv_settled_timeout(&self, timeout: Duration) -> Option<String> {
        self.settled_rx.recv_timeout(timeout).ok()
    }
}

/// Worker thread main loop.
///
/// Two states: idle (no pending value, block on the input channel) and
/// pending (one value held, wait out the remainder of its quiescence
/// window). A push while pending replaces the value and restarts the
/// deadline, so at most one delivery is ever outstanding and it always
/// carries the latest text.
fn worker_loop(input_rx: Receiver<String>, settled_tx: Sender<String>, window: Duration) {
    let mut pending: Option<(String, Instant)> = None;

    loop {
        match pending.take() {
            None => match input_rx.recv() {
                Ok(text) => {
                    trace!("content push ({} bytes), starting quiescence window", text.len());
                    pending = Some((text, Instant::now() + window));
                }
                // Handle dropped, worker exits
                Err(_) => break,
            },
            Some((text, deadline)) => {
                let now = Instant::now();
                if now >= deadline {
                    debug!("content settled after quiescence ({} bytes)", text.len());
                    if settled_tx.send(text).is_err() {
                        break;
                    }
                    continue;
                }

                match input_rx.recv_timeout(deadline - now) {
                    Ok(newer) => {
                        trace!("superseding pending content ({} bytes)", newer.len());
                        pending = Some((newer, Instant::now() + window));
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        debug!("content settled after quiescence ({} bytes)", text.len());
                        if settled_tx.send(text).is_err() {
                            break;
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(80);

    fn recv_within(updater: &ContentUpdater, ms: u64) -> Option<String> {
        updater.recv_settled_timeout(Duration::from_millis(ms))
    }

    #[test]
    fn test_single_push_delivers_after_window() {
        let updater = ContentUpdater::spawn(WINDOW);
        updater.push("hello".to_string());

        assert_eq!(recv_within(&updater, 500).as_deref(), Some("hello"));
    }

    #[test]
    fn test_rapid_pushes_coalesce_to_latest() {
        let updater = ContentUpdater::spawn(WINDOW);
        updater.push("a".to_string());
        updater.push("ab".to_string());
        updater.push("abc".to_string());

        assert_eq!(recv_within(&updater, 500).as_deref(), Some("abc"));
        // The superseded values are never delivered
        assert!(recv_within(&updater, 200).is_none());
    }

    #[test]
    fn test_separated_pushes_deliver_separately() {
        let updater = ContentUpdater::spawn(WINDOW);

        updater.push("a".to_string());
        assert_eq!(recv_within(&updater, 500).as_deref(), Some("a"));

        updater.push("b".to_string());
        assert_eq!(recv_within(&updater, 500).as_deref(), Some("b"));
    }

    #[test]
    fn test_no_delivery_before_window_elapses() {
        let updater = ContentUpdater::spawn(Duration::from_millis(200));
        updater.push("early?".to_string());

        // Well inside the window nothing may be delivered
        assert!(recv_within(&updater, 50).is_none());
        // But it arrives once the window has passed
        assert_eq!(recv_within(&updater, 1000).as_deref(), Some("early?"));
    }

    #[test]
    fn test_push_restarts_window() {
        let updater = ContentUpdater::spawn(Duration::from_millis(150));

        updater.push("first".to_string());
        thread::sleep(Duration::from_millis(80));
        updater.push("second".to_string());

        // 80ms after the second push the original window would have expired;
        // the restarted one has not
        assert!(recv_within(&updater, 50).is_none());
        assert_eq!(recv_within(&updater, 1000).as_deref(), Some("second"));
    }

    #[test]
    fn test_deliveries_stay_ordered() {
        let updater = ContentUpdater::spawn(Duration::from_millis(40));

        for i in 0..3 {
            updater.push(format!("round {}", i));
            // Wait out each window so every round settles
            let got = recv_within(&updater, 500).unwrap();
            assert_eq!(got, format!("round {}", i));
        }
    }
}
