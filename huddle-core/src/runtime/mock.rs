//! Mock runtime for testing
//!
//! MockRuntimeFactory scripts start/shutdown outcomes ahead of time; each
//! runtime it creates pops the next script. A shared [`RuntimeProbe`]
//! records what every runtime did, and hold-gates let a test keep a start
//! or a shutdown suspended mid-flight to exercise overlapping requests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use super::traits::{RuntimeFactory, SessionRuntime, StartArgs};
use crate::error::RuntimeError;
use crate::session::SessionMode;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Something a mock runtime did, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    Started { mode: SessionMode, name: String },
    Released { name: String },
}

/// Shared recorder for mock runtime activity
///
/// Tracks live sessions and the high-water mark so tests can assert that at
/// most one session ever runs at a time.
#[derive(Clone, Default)]
pub struct RuntimeProbe {
    inner: Arc<ProbeInner>,
}

#[derive(Default)]
struct ProbeInner {
    events: Mutex<Vec<ProbeEvent>>,
    live: AtomicUsize,
    max_live: AtomicUsize,
}

impl RuntimeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far
    pub fn events(&self) -> Vec<ProbeEvent> {
        lock(&self.inner.events).clone()
    }

    /// How many sessions were started
    pub fn start_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProbeEvent::Started { .. }))
            .count()
    }

    /// How many sessions were released
    pub fn release_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProbeEvent::Released { .. }))
            .count()
    }

    /// Sessions live right now
    pub fn live(&self) -> usize {
        self.inner.live.load(Ordering::SeqCst)
    }

    /// Most sessions ever live at once
    pub fn max_live(&self) -> usize {
        self.inner.max_live.load(Ordering::SeqCst)
    }

    fn record_start(&self, mode: SessionMode, name: &str) {
        let live = self.inner.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.max_live.fetch_max(live, Ordering::SeqCst);
        lock(&self.inner.events).push(ProbeEvent::Started {
            mode,
            name: name.to_string(),
        });
    }

    fn record_release(&self, name: &str) {
        self.inner.live.fetch_sub(1, Ordering::SeqCst);
        lock(&self.inner.events).push(ProbeEvent::Released {
            name: name.to_string(),
        });
    }
}

/// Outcomes one mock runtime will report
struct RuntimeScript {
    start: Result<(), RuntimeError>,
    shutdown: Result<(), RuntimeError>,
}

impl Default for RuntimeScript {
    fn default() -> Self {
        Self {
            start: Ok(()),
            shutdown: Ok(()),
        }
    }
}

type GateCell = Arc<Mutex<Option<Arc<Semaphore>>>>;

async fn wait_at(gate: &GateCell) {
    // Snapshot under the lock, await outside it
    let semaphore = lock(gate).clone();
    if let Some(semaphore) = semaphore {
        if let Ok(permit) = semaphore.acquire().await {
            permit.forget();
        }
    }
}

/// Mock implementation of [`SessionRuntime`]
///
/// Created through [`MockRuntimeFactory`], which decides the outcomes this
/// runtime reports and shares the probe it records into.
pub struct MockRuntime {
    start_outcome: Option<Result<(), RuntimeError>>,
    shutdown_outcome: Option<Result<(), RuntimeError>>,
    probe: RuntimeProbe,
    start_gate: GateCell,
    shutdown_gate: GateCell,
    session: Option<(SessionMode, String)>,
}

#[async_trait]
impl SessionRuntime for MockRuntime {
    async fn start(&mut self, args: StartArgs<'_>) -> Result<(), RuntimeError> {
        wait_at(&self.start_gate).await;
        match self.start_outcome.take().unwrap_or(Ok(())) {
            Ok(()) => {
                self.session = Some((args.mode, args.name.to_string()));
                self.probe.record_start(args.mode, args.name);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    async fn shutdown(&mut self) -> Result<(), RuntimeError> {
        wait_at(&self.shutdown_gate).await;
        if let Some((_, name)) = self.session.take() {
            self.probe.record_release(&name);
        }
        self.shutdown_outcome.take().unwrap_or(Ok(()))
    }
}

/// Factory for scripted [`MockRuntime`] instances
///
/// Without scripting, every runtime starts and shuts down cleanly. Queue a
/// script per upcoming runtime to make one fail; runtimes beyond the queue
/// fall back to clean behavior.
#[derive(Default)]
pub struct MockRuntimeFactory {
    scripts: Mutex<VecDeque<RuntimeScript>>,
    probe: RuntimeProbe,
    start_gate: GateCell,
    shutdown_gate: GateCell,
}

impl MockRuntimeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The probe shared by every runtime this factory creates
    pub fn probe(&self) -> RuntimeProbe {
        self.probe.clone()
    }

    /// Script the next runtime to start and shut down cleanly
    pub fn queue_ok(&self) {
        lock(&self.scripts).push_back(RuntimeScript::default());
    }

    /// Script the next runtime's start to fail with `reason`
    pub fn queue_start_failure(&self, reason: impl Into<String>) {
        lock(&self.scripts).push_back(RuntimeScript {
            start: Err(RuntimeError::StartFailed {
                reason: reason.into(),
            }),
            shutdown: Ok(()),
        });
    }

    /// Script the next runtime to start cleanly but fail its shutdown
    pub fn queue_shutdown_failure(&self, reason: impl Into<String>) {
        lock(&self.scripts).push_back(RuntimeScript {
            start: Ok(()),
            shutdown: Err(RuntimeError::ShutdownFailed {
                reason: reason.into(),
            }),
        });
    }

    /// Hold every subsequent start until the returned semaphore gets permits
    pub fn hold_starts(&self) -> Arc<Semaphore> {
        let semaphore = Arc::new(Semaphore::new(0));
        *lock(&self.start_gate) = Some(Arc::clone(&semaphore));
        semaphore
    }

    /// Hold every subsequent shutdown until the returned semaphore gets permits
    pub fn hold_shutdowns(&self) -> Arc<Semaphore> {
        let semaphore = Arc::new(Semaphore::new(0));
        *lock(&self.shutdown_gate) = Some(Arc::clone(&semaphore));
        semaphore
    }
}

impl RuntimeFactory for MockRuntimeFactory {
    fn create(&self) -> Box<dyn SessionRuntime> {
        let script = lock(&self.scripts).pop_front().unwrap_or_default();
        Box::new(MockRuntime {
            start_outcome: Some(script.start),
            shutdown_outcome: Some(script.shutdown),
            probe: self.probe.clone(),
            start_gate: Arc::clone(&self.start_gate),
            shutdown_gate: Arc::clone(&self.shutdown_gate),
            session: None,
        })
    }
}
