use tracing::{metadata::LevelFilter, Subscriber};
use tracing_subscriber::{filter::ParseError, layer::SubscriberExt, EnvFilter};

#[cfg(feature = "file-log")]
mod file;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn setup_logging(log_level: &str) {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_owned());
    let (subscriber, parse_err) = parse_log_level(&level);
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Couldn't setup global subscriber (logger): {err}");
    }
    if let Some(err) = parse_err {
        tracing::warn!("Invalid log level `{}`, using info: {}", level, err);
    }
}

#[must_use]
pub fn parse_log_level(level_regex: &str) -> (impl Subscriber, Option<ParseError>) {
    let mut parse_err = None;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse(level_regex)
        .unwrap_or_else(|err| {
            parse_err = Some(err);
            EnvFilter::default().add_directive(LevelFilter::INFO.into())
        });
    (get_subscribers(filter), parse_err)
}

/// Stdout belongs to the shell, so the console log goes to stderr.
#[allow(clippy::let_and_return)]
pub fn get_subscribers(filter: EnvFilter) -> impl Subscriber {
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    #[cfg(feature = "file-log")]
    let subscriber = file::add_layer(subscriber);

    subscriber
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_bad_level_falls_back_and_reports() {
        let (_, err) = parse_log_level("codeview_core=trace,warn");
        assert!(err.is_none());
        let (_, err) = parse_log_level("codeview_core=chatty");
        assert!(err.is_some());
    }
}
