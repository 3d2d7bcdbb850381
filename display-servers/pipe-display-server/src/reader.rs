use crate::{parse_event, PipeWindowHandle};
use codeview_core::DisplayEvent;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::{mpsc, Notify};

/// Forward every event read from `input` until it closes, then report the shell as gone.
pub fn spawn<R>(
    input: R,
    tx: mpsc::UnboundedSender<DisplayEvent<PipeWindowHandle>>,
    task_notify: Arc<Notify>,
) -> tokio::task::JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        read_events(input, &tx, &task_notify).await;
        tx.send(DisplayEvent::Stop).ok();
        task_notify.notify_one();
    })
}

async fn read_events<R>(
    input: R,
    tx: &mpsc::UnboundedSender<DisplayEvent<PipeWindowHandle>>,
    task_notify: &Notify,
) where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return,
            Err(err) => {
                tracing::error!("Couldn't read from the shell: {}", err);
                return;
            }
        };
        match parse_event(&line) {
            Ok(Some(event)) => {
                if tx.send(event).is_err() {
                    return;
                }
                task_notify.notify_one();
            }
            Ok(None) => {}
            Err(err) => tracing::error!("An error occurred while parsing an event: {}", err),
        }
    }
}
