//! Async driver for a [`MatchCoordinator`].
//!
//! One task owns the coordinator. External inputs arrive on an unbounded
//! channel; scheduled wake-ups are sleeping tasks that post back into a
//! second channel. Every other effect is forwarded to the caller.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::coordinator::MatchCoordinator;
use crate::effect::{Effect, Scheduled, TaskKind};
use crate::input::Input;

/// Sends inputs to a running match.
#[derive(Debug, Clone)]
pub struct MatchHandle {
    inputs: mpsc::UnboundedSender<Input>,
}

impl MatchHandle {
    /// Queues an input.
    ///
    /// # Errors
    ///
    /// Fails once the runtime has stopped.
    pub fn send(&self, input: Input) -> Result<()> {
        self.inputs
            .send(input)
            .map_err(|_| anyhow!("match runtime has stopped"))
    }
}

/// Event loop around a coordinator.
pub struct MatchRuntime {
    coordinator: MatchCoordinator,
    inputs: mpsc::UnboundedReceiver<Input>,
    wake_tx: mpsc::UnboundedSender<Input>,
    wake_rx: mpsc::UnboundedReceiver<Input>,
    effect_tx: mpsc::UnboundedSender<Effect>,
    pending: HashMap<TaskKind, JoinHandle<()>>,
}

impl MatchRuntime {
    /// Wires a runtime; nothing runs until [`MatchRuntime::run`].
    pub fn new(coordinator: MatchCoordinator, effect_tx: mpsc::UnboundedSender<Effect>) -> (Self, MatchHandle) {
        let (input_tx, inputs) = mpsc::unbounded_channel();
        let (wake_tx, wake_rx) = mpsc::unbounded_channel();
        let runtime = Self {
            coordinator,
            inputs,
            wake_tx,
            wake_rx,
            effect_tx,
            pending: HashMap::new(),
        };
        (runtime, MatchHandle { inputs: input_tx })
    }

    /// Runs until every [`MatchHandle`] is dropped.
    ///
    /// # Errors
    ///
    /// Fails when the effect receiver goes away.
    #[instrument(skip(self))]
    pub async fn run(mut self) -> Result<()> {
        info!("Starting match runtime");
        let effects = self.coordinator.start();
        self.dispatch(effects)?;

        loop {
            let input = tokio::select! {
                input = self.inputs.recv() => match input {
                    Some(input) => input,
                    None => break,
                },
                Some(wake) = self.wake_rx.recv() => wake,
            };
            let effects = self.coordinator.handle(input);
            self.dispatch(effects)?;
        }

        for (kind, task) in self.pending.drain() {
            debug!(%kind, "Aborting pending task on shutdown");
            task.abort();
        }
        info!("Match runtime stopped");
        Ok(())
    }

    fn dispatch(&mut self, effects: Vec<Effect>) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::Schedule(task) => self.schedule(task),
                Effect::Cancel(kind) => self.cancel(kind),
                other => self
                    .effect_tx
                    .send(other)
                    .map_err(|_| anyhow!("effect receiver dropped"))?,
            }
        }
        Ok(())
    }

    fn schedule(&mut self, task: Scheduled) {
        self.cancel(task.kind);
        let wake_tx = self.wake_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(task.delay).await;
            // Receiver only closes when the runtime itself is gone.
            let _ = wake_tx.send(Input::Wake(task.wake));
        });
        debug!(kind = %task.kind, delay = ?task.delay, "Task scheduled");
        self.pending.insert(task.kind, handle);
    }

    fn cancel(&mut self, kind: TaskKind) {
        if let Some(task) = self.pending.remove(&kind) {
            task.abort();
        }
    }
}

/// Spawns a runtime on the current tokio runtime.
///
/// Effects are delivered to `effect_tx`. The returned task finishes after
/// every handle is dropped.
pub fn spawn(
    coordinator: MatchCoordinator,
    effect_tx: mpsc::UnboundedSender<Effect>,
) -> (MatchHandle, JoinHandle<Result<()>>) {
    let (runtime, handle) = MatchRuntime::new(coordinator, effect_tx);
    (handle, tokio::spawn(runtime.run()))
}
