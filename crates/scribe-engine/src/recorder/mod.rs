//! The recorder: session state, coalescing and per-control debounce behind
//! one lock, shared by every interaction source.

pub mod coalescer;
pub mod navigation;
pub mod notification;

pub use coalescer::{Coalescer, DropReason, InputKey, Outcome, PendingInput};
pub use navigation::NavigationFilter;
pub use notification::{ControlState, Notification};

use crate::codegen::ScriptGenerator;
use crate::config::ScribeConfig;
use crate::dom::DomNode;
use crate::session::{Session, StartOptions};
use scribe_common::formatter::format_action;
use scribe_common::protocol::{Action, RecordingState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, trace, warn};

const EVENT_CAPACITY: usize = 100;

/// Change notifications for UI surfaces and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderEvent {
    ActionsUpdated(Vec<Action>),
    StatusChanged(RecordingState),
}

struct PendingEntry {
    input: PendingInput,
    seq: u64,
    task: JoinHandle<()>,
}

#[derive(Default)]
struct Inner {
    session: Session,
    pending: HashMap<InputKey, PendingEntry>,
    next_seq: u64,
}

/// Cloneable handle to one recording session.
///
/// Keystrokes are debounced per control on the tokio runtime, so
/// [`Recorder::handle`] must be called from within one.
#[derive(Clone)]
pub struct Recorder {
    inner: Arc<Mutex<Inner>>,
    coalescer: Arc<Coalescer>,
    generator: Arc<ScriptGenerator>,
    events: broadcast::Sender<RecorderEvent>,
    debounce: Duration,
    flush_on_stop: bool,
    sensitive_fields: Arc<Vec<String>>,
}

impl Recorder {
    pub fn new(config: &ScribeConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            coalescer: Arc::new(Coalescer::from_config(config)),
            generator: Arc::new(ScriptGenerator::new(config.codegen.clone())),
            events,
            debounce: Duration::from_millis(config.recording.debounce_ms),
            flush_on_stop: config.recording.flush_pending_on_stop,
            sensitive_fields: Arc::new(config.security.sensitive_fields.clone()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RecorderEvent> {
        self.events.subscribe()
    }

    /// Begin recording. A no-op returning `false` when already active.
    pub fn start(&self, options: StartOptions) -> bool {
        let mut inner = self.lock();
        if !inner.session.start(options) {
            return false;
        }
        self.emit(RecorderEvent::StatusChanged(RecordingState::Active));
        if options.clear_log {
            self.emit(RecorderEvent::ActionsUpdated(Vec::new()));
        }
        true
    }

    /// Stop recording. Typing still in its quiet period is committed first
    /// (or discarded, per configuration); nothing is appended once idle.
    pub fn stop(&self) -> bool {
        let mut inner = self.lock();
        if !inner.session.is_active() {
            return false;
        }

        let mut pending: Vec<PendingEntry> = inner.pending.drain().map(|(_, entry)| entry).collect();
        pending.sort_by_key(|entry| entry.seq);
        for entry in pending {
            entry.task.abort();
            if self.flush_on_stop {
                self.commit(&mut inner, entry.input);
            } else {
                debug!(selector = %entry.input.selector, "Discarded pending input on stop");
            }
        }

        inner.session.stop();
        self.emit(RecorderEvent::StatusChanged(RecordingState::Idle));
        true
    }

    /// Clear the log, markers and any typing in flight.
    pub fn reset(&self) {
        let mut inner = self.lock();
        for (_, entry) in inner.pending.drain() {
            entry.task.abort();
        }
        inner.session.reset();
        self.emit(RecorderEvent::ActionsUpdated(Vec::new()));
    }

    pub fn status(&self) -> RecordingState {
        self.lock().session.state()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.lock().session.log().to_vec()
    }

    /// Number of controls with typing still in its quiet period.
    pub fn pending_inputs(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn generate_script(&self) -> String {
        let actions = self.actions();
        self.generator.generate(&actions)
    }

    pub fn sensitive_fields(&self) -> &[String] {
        &self.sensitive_fields
    }

    pub fn handle<N: DomNode>(&self, notification: Notification<N>) -> Outcome {
        let mut inner = self.lock();
        let outcome = self.coalescer.coalesce(&mut inner.session, notification);
        match outcome {
            Outcome::Pending(input) => self.schedule(&mut inner, input),
            outcome => {
                self.report(&inner, &outcome);
                outcome
            }
        }
    }

    /// (Re)start the quiet-period timer for a control; the newest value wins.
    fn schedule(&self, inner: &mut Inner, input: PendingInput) -> Outcome {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime, committing input without debounce");
            return self.commit(inner, input);
        };

        inner.next_seq += 1;
        let seq = inner.next_seq;
        let key = input.key.clone();
        let deadline = Instant::now() + self.debounce;

        let recorder = self.clone();
        let task_key = key.clone();
        let task = runtime.spawn(async move {
            sleep_until(deadline).await;
            recorder.expire(&task_key, seq);
        });

        trace!(selector = %input.selector, seq, "Input pending");
        let entry = PendingEntry {
            input: input.clone(),
            seq,
            task,
        };
        if let Some(previous) = inner.pending.insert(key, entry) {
            previous.task.abort();
        }
        Outcome::Pending(input)
    }

    fn expire(&self, key: &InputKey, seq: u64) {
        let mut inner = self.lock();
        match inner.pending.get(key) {
            Some(entry) if entry.seq == seq => {}
            _ => return,
        }
        if let Some(entry) = inner.pending.remove(key) {
            self.commit(&mut inner, entry.input);
        }
    }

    fn commit(&self, inner: &mut Inner, input: PendingInput) -> Outcome {
        let outcome = self.coalescer.commit_input(&mut inner.session, input);
        self.report(inner, &outcome);
        outcome
    }

    fn report(&self, inner: &Inner, outcome: &Outcome) {
        match outcome {
            Outcome::Appended(action) => {
                info!(
                    action = %format_action(action, &self.sensitive_fields),
                    "Recorded action"
                );
                self.emit(RecorderEvent::ActionsUpdated(inner.session.log().to_vec()));
            }
            Outcome::Dropped(reason) => debug!(%reason, "Dropped notification"),
            Outcome::Pending(_) => {}
        }
    }

    fn emit(&self, event: RecorderEvent) {
        // No subscribers is normal.
        let _ = self.events.send(event);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
