use super::Config;
use super::DisplayAction;
use super::DisplayEvent;
use super::DisplayServer;
use crate::models::Handle;

/// Records what it was asked to do and answers nothing.
#[derive(Clone, Debug, Default)]
pub struct MockDisplayServer<H: Handle> {
    pub events: Vec<DisplayEvent<H>>,
    pub executed: Vec<DisplayAction<H>>,
}

impl<H: Handle> DisplayServer<H> for MockDisplayServer<H> {
    fn new(_: &impl Config) -> Self {
        Self {
            events: vec![],
            executed: vec![],
        }
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>> {
        std::mem::take(&mut self.events)
    }

    fn execute_action(&mut self, act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        self.executed.push(act);
        None
    }

    /// Ready while there are queued events, never otherwise.
    fn wait_readable(&self) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()>>> {
        if self.events.is_empty() {
            Box::pin(futures::future::pending())
        } else {
            Box::pin(futures::future::ready(()))
        }
    }

    fn flush(&self) {}
}
