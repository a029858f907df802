use tracing::{debug, error, info, warn};

use crate::application::ports::{LogLevel, LogSink};

/// Forwards engine log lines into `tracing` under the `media_engine` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, level: LogLevel, message: &str) {
        let message = message.trim_end();
        match level {
            LogLevel::Debug => debug!(target: "media_engine", "{}", message),
            LogLevel::Info => info!(target: "media_engine", "{}", message),
            LogLevel::Warning => warn!(target: "media_engine", "{}", message),
            LogLevel::Error => error!(target: "media_engine", "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct Capture(Arc<Mutex<Vec<(Level, String)>>>);

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            self.0.lock().push((*metadata.level(), metadata.target().to_string()));
        }
    }

    #[test]
    fn test_levels_are_mapped() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(Capture(events.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let sink = TracingLogSink;
            sink.log(LogLevel::Debug, "ice gathering\n");
            sink.log(LogLevel::Info, "connected");
            sink.log(LogLevel::Warning, "packet loss");
            sink.log(LogLevel::Error, "decoder failed");
        });

        let events = events.lock();
        let levels: Vec<Level> = events.iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, vec![Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR]);
        assert!(events.iter().all(|(_, target)| target == "media_engine"));
    }
}
