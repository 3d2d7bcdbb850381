//! Drives the coordinator from a shell that sits on the other end of a pair of pipes.
//!
//! Every line read from stdin is one [`DisplayEvent`], every line written to stdout is one
//! [`DisplayAction`], both as JSON.
mod reader;
mod wire;

pub use wire::{encode_action, parse_event};

use codeview_core::config::Config;
use codeview_core::models::Handle;
use codeview_core::{DisplayAction, DisplayEvent, DisplayServer};
use futures::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};

/// Windows are numbered by the shell. The number stays the same for the life of the window.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipeWindowHandle(pub u64);
impl Handle for PipeWindowHandle {}

pub struct PipeDisplayServer {
    rx: mpsc::UnboundedReceiver<DisplayEvent<PipeWindowHandle>>,
    task_notify: Arc<Notify>,
}

impl DisplayServer<PipeWindowHandle> for PipeDisplayServer {
    /// Must be called from within a tokio runtime.
    fn new(_config: &impl Config) -> Self {
        let task_notify = Arc::new(Notify::new());
        let (tx, rx) = mpsc::unbounded_channel();
        reader::spawn(tokio::io::stdin(), tx, task_notify.clone());
        Self { rx, task_notify }
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<PipeWindowHandle>> {
        let mut events = vec![];
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn execute_action(
        &mut self,
        act: DisplayAction<PipeWindowHandle>,
    ) -> Option<DisplayEvent<PipeWindowHandle>> {
        tracing::trace!("DisplayAction: {:?}", act);
        match encode_action(&act) {
            Ok(line) => {
                let mut out = std::io::stdout().lock();
                if let Err(err) = writeln!(out, "{line}") {
                    tracing::error!("Couldn't write to the shell: {}", err);
                    return Some(DisplayEvent::Stop);
                }
            }
            Err(err) => tracing::error!("Couldn't encode {:?}: {}", act, err),
        }
        None
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>> {
        let task_notify = self.task_notify.clone();
        Box::pin(async move {
            task_notify.notified().await;
        })
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}
