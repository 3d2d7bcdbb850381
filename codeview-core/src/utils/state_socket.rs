use crate::errors::{CodeviewError, Result};
use crate::models::dto::SessionsState;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Peers {
    peers: Vec<Option<UnixStream>>,
    last_state: String,
}

/// Publishes the session list as one JSON line per change to every connected peer.
#[derive(Debug, Default)]
pub struct StateSocket {
    state: Arc<Mutex<Peers>>,
    listener: Option<tokio::task::JoinHandle<()>>,
    socket_file: PathBuf,
}

impl Drop for StateSocket {
    fn drop(&mut self) {
        assert!(
            std::thread::panicking() || self.listener.is_none(),
            "StateSocket has to be shutdown explicitly before drop"
        );
    }
}

impl StateSocket {
    /// Bind to Unix socket and listen.
    /// # Errors
    ///
    /// Will error if the socket file cannot be bound, likely a filesystem issue such as
    /// incorrect permissions or a missing runtime directory.
    pub async fn listen(&mut self, socket_file: PathBuf) -> Result<()> {
        self.socket_file = socket_file;
        let listener = self.build_listener().await?;
        self.listener = Some(listener);
        Ok(())
    }

    /// Explicitly shutdown `StateSocket` to perform cleanup.
    pub async fn shutdown(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
            listener.await.ok();
            fs::remove_file(self.socket_file.as_path()).await.ok();
        }
    }

    /// Send `state` to every peer, unless it did not change since the last write.
    /// # Errors
    /// Will return error if state cannot be serialized.
    pub async fn write_sessions_state(&mut self, state: &SessionsState) -> Result<()> {
        if self.listener.is_some() {
            let mut json = serde_json::to_string(state)?;
            json.push('\n');
            let mut peers = self.state.lock().await;

            if json != peers.last_state {
                peers.peers.retain(Option::is_some);
                for peer in &mut peers.peers {
                    if peer
                        .as_mut()
                        .ok_or(CodeviewError::StreamError)?
                        .write_all(json.as_bytes())
                        .await
                        .is_err()
                    {
                        peer.take();
                    }
                }
                peers.last_state = json;
            }
        }
        Ok(())
    }

    async fn build_listener(&self) -> Result<tokio::task::JoinHandle<()>> {
        let state = self.state.clone();
        let listener = if let Ok(m) = UnixListener::bind(&self.socket_file) {
            m
        } else {
            fs::remove_file(&self.socket_file).await?;
            UnixListener::bind(&self.socket_file)?
        };

        Ok(tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((mut peer, _)) => {
                        let mut state = state.lock().await;
                        if peer.write_all(state.last_state.as_bytes()).await.is_ok() {
                            state.peers.push(Some(peer));
                        }
                    }
                    Err(e) => tracing::error!("Accept failed = {:?}", e),
                }
            }
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::dto::SessionState;
    use crate::models::Side;
    use crate::utils::helpers::test::temp_path;
    use tokio::io::{AsyncBufReadExt, BufReader};

    fn sessions(count: u32) -> SessionsState {
        SessionsState {
            hack_mode_enabled: true,
            sessions: (1..=count)
                .map(|id| SessionState {
                    id,
                    app_id: Some("org.example.Game".to_owned()),
                    app_title: None,
                    has_app: true,
                    has_toolbox: false,
                    side: Side::App,
                    flipping: false,
                    grabbed: false,
                    button_visible: false,
                    button_highlighted: false,
                    toolbox_visible: false,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn multiple_peers() {
        let state = sessions(1);
        let expected = serde_json::to_string(&state).unwrap();

        let socket_file = temp_path().await.unwrap();
        let mut state_socket = StateSocket::default();
        state_socket.listen(socket_file.clone()).await.unwrap();
        state_socket.write_sessions_state(&state).await.unwrap();

        for _ in 0..3 {
            let line = BufReader::new(UnixStream::connect(socket_file.clone()).await.unwrap())
                .lines()
                .next_line()
                .await
                .expect("Read next line")
                .unwrap();
            assert_eq!(expected, line);
        }

        state_socket.shutdown().await;
    }

    #[tokio::test]
    async fn get_update() {
        let socket_file = temp_path().await.unwrap();
        let mut state_socket = StateSocket::default();
        state_socket.listen(socket_file.clone()).await.unwrap();
        state_socket.write_sessions_state(&sessions(1)).await.unwrap();

        let mut lines = BufReader::new(UnixStream::connect(socket_file).await.unwrap()).lines();
        assert_eq!(
            serde_json::to_string(&sessions(1)).unwrap(),
            lines.next_line().await.expect("Read next line").unwrap()
        );

        state_socket.write_sessions_state(&sessions(2)).await.unwrap();
        assert_eq!(
            serde_json::to_string(&sessions(2)).unwrap(),
            lines.next_line().await.expect("Read next line").unwrap()
        );

        state_socket.shutdown().await;
    }

    #[tokio::test]
    async fn socket_cleanup() {
        let socket_file = temp_path().await.unwrap();
        let mut state_socket = StateSocket::default();
        state_socket.listen(socket_file.clone()).await.unwrap();
        state_socket.shutdown().await;
        assert!(!socket_file.exists());
    }

    #[tokio::test]
    async fn socket_already_bound() {
        let socket_file = temp_path().await.unwrap();
        let mut old_socket = StateSocket::default();
        old_socket.listen(socket_file.clone()).await.unwrap();
        assert!(socket_file.exists());
        let mut state_socket = StateSocket::default();
        state_socket.listen(socket_file.clone()).await.unwrap();
        state_socket.shutdown().await;
        assert!(!socket_file.exists());
        old_socket.shutdown().await;
    }
}
