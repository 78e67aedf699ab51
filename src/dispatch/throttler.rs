use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::dispatch::command::{plan, KnobMap};
use crate::dispatch::sink::CommandSink;
use crate::formant::FormantVector;

/// Background dispatcher with a single-slot coalescing mailbox.
///
/// Bursty input (continuous pad dragging) never grows a queue: a new
/// submission replaces the pending one, so at most one dispatch is in
/// flight and the latest vector always wins. A `force_full` request
/// survives coalescing — if a toggle's full resend were superseded by a
/// plain drag update, the hardware could be left holding stale fields.
///
/// Sends are spaced at least `interval` apart. On a sink failure the
/// worker forgets its last-sent vector so the next dispatch resends the
/// full state; session presets are untouched either way.
pub struct Throttler {
    mailbox: Arc<Mailbox>,
    handle: Option<JoinHandle<()>>,
}

struct Mailbox {
    state: Mutex<MailboxState>,
    wake: Condvar,
}

#[derive(Default)]
struct MailboxState {
    pending: Option<Pending>,
    shutdown: bool,
}

#[derive(Clone, Copy)]
struct Pending {
    vector: FormantVector,
    force_full: bool,
}

impl Throttler {
    pub fn spawn<S>(mut sink: S, map: KnobMap, interval: Duration) -> Self
    where
        S: CommandSink + Send + 'static,
    {
        let mailbox = Arc::new(Mailbox {
            state: Mutex::new(MailboxState::default()),
            wake: Condvar::new(),
        });
        let shared = Arc::clone(&mailbox);

        let handle = thread::spawn(move || {
            let mut last_sent: Option<FormantVector> = None;
            let mut last_send_at: Option<Instant> = None;

            loop {
                // Park until there is work; a shutdown with pending work
                // still flushes it first.
                let taken = {
                    let mut st = shared.state.lock().expect("throttler mailbox poisoned");
                    loop {
                        if let Some(req) = st.pending.take() {
                            break Some(req);
                        }
                        if st.shutdown {
                            break None;
                        }
                        st = shared
                            .wake
                            .wait(st)
                            .expect("throttler mailbox poisoned");
                    }
                };
                let Some(mut req) = taken else { break };

                if let Some(at) = last_send_at {
                    let elapsed = at.elapsed();
                    if elapsed < interval {
                        thread::sleep(interval - elapsed);
                    }
                }

                // Anything submitted while we were rate-limited supersedes
                // the taken request; its force_full intent is kept.
                {
                    let mut st = shared.state.lock().expect("throttler mailbox poisoned");
                    if let Some(newer) = st.pending.take() {
                        req = Pending {
                            vector: newer.vector,
                            force_full: newer.force_full || req.force_full,
                        };
                    }
                }

                let cmds = plan(last_sent.as_ref(), &req.vector, req.force_full, &map);
                let mut failed = false;
                for cmd in &cmds {
                    if let Err(err) = sink.send(cmd) {
                        warn!(param = cmd.label(), %err, "dispatch failed; full resend scheduled");
                        failed = true;
                        break;
                    }
                }
                if failed {
                    last_sent = None;
                } else {
                    last_sent = Some(req.vector);
                    debug!(commands = cmds.len(), full = req.force_full, "dispatch complete");
                }
                last_send_at = Some(Instant::now());
            }
        });

        Self {
            mailbox,
            handle: Some(handle),
        }
    }

    /// Queue a vector for dispatch, replacing any pending one.
    pub fn submit(&self, vector: FormantVector, force_full: bool) {
        let mut st = self
            .mailbox
            .state
            .lock()
            .expect("throttler mailbox poisoned");
        let force_full = force_full || st.pending.map_or(false, |p| p.force_full);
        st.pending = Some(Pending { vector, force_full });
        self.mailbox.wake.notify_one();
    }
}

impl Drop for Throttler {
    fn drop(&mut self) {
        {
            let mut st = self
                .mailbox
                .state
                .lock()
                .expect("throttler mailbox poisoned");
            st.shutdown = true;
        }
        self.mailbox.wake.notify_one();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
