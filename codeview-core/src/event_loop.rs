use crate::config::Config;
use crate::models::dto::SessionsState;
use crate::models::Handle;
use crate::utils::helpers::place_runtime_file;
use crate::{DisplayServer, Manager, StateSocket};
use std::sync::atomic::Ordering;
use std::time::Instant;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Run until the stop flag is raised or the shell says it is shutting down.
    pub async fn start_event_loop(mut self) {
        let mut state_socket = StateSocket::default();
        match place_runtime_file("sessions.sock") {
            Ok(socket_file) => {
                if let Err(err) = state_socket.listen(socket_file).await {
                    tracing::error!("Couldn't listen on sessions.sock: {}", err);
                }
            }
            Err(err) => tracing::error!("Couldn't create sessions.sock: {}", err),
        }

        let mut event_buffer = vec![];
        let mut needs_publish = true;
        loop {
            if needs_publish {
                let sessions: SessionsState = (self.sessions.as_slice(), &self.state).into();
                if let Err(err) = state_socket.write_sessions_state(&sessions).await {
                    tracing::warn!("Couldn't publish sessions: {}", err);
                }
                needs_publish = false;
            }
            self.display_server.flush();

            let deadline = self.state.timers.next_deadline();
            tokio::select! {
                () = self.display_server.wait_readable(), if event_buffer.is_empty() => {
                    event_buffer.append(&mut self.display_server.get_next_events());
                    continue;
                }
                () = sleep_until(deadline), if event_buffer.is_empty() && deadline.is_some() => {
                    for timer in self.state.timers.take_expired(Instant::now()) {
                        needs_publish = self.timer_fired(timer) || needs_publish;
                    }
                }
                else => {
                    event_buffer
                        .drain(..)
                        .for_each(|event| needs_publish = self.display_event_handler(event) || needs_publish);
                }
            }

            // Perform any actions requested by the handlers.
            while let Some(act) = self.state.actions.pop_front() {
                if let Some(event) = self.display_server.execute_action(act) {
                    event_buffer.push(event);
                }
            }

            if self.stop_requested.load(Ordering::SeqCst) {
                tracing::info!("Stop requested");
                break;
            }
            if self.stopped && event_buffer.is_empty() {
                tracing::info!("Shell is shutting down");
                break;
            }
        }
        self.display_server.flush();
        state_socket.shutdown().await;
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => futures::future::pending().await,
    }
}
