use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use xdg::BaseDirectories;

const LOG_FILE_NAME: &str = "codeview.log";

/// Also log to `$XDG_CACHE_HOME/codeview/codeview.log`, when that directory can be created.
pub fn add_layer<S>(subscriber: S) -> impl Subscriber + for<'span> LookupSpan<'span>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let layer = log_dir().map(|dir| {
        let writer = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
    });
    subscriber.with(layer)
}

fn log_dir() -> Option<PathBuf> {
    let dirs = BaseDirectories::with_prefix("codeview").ok()?;
    dirs.create_cache_directory("")
        .map_err(|err| eprintln!("Couldn't create log directory: {err}"))
        .ok()
}
