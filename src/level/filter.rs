//! Bridge between [`AtomicLevel`] and `tracing-subscriber` per-layer filtering.
//!
//! Lets a process's own `tracing` diagnostics obey the same switch as its
//! structured loggers.

use tracing::subscriber::Interest;
use tracing::Metadata;
use tracing_subscriber::layer::{Context, Filter};

use crate::level::{AtomicLevel, Severity};

impl<S> Filter<S> for AtomicLevel {
    fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        // Spans are always enabled so events inside them keep their context.
        if meta.is_span() {
            return true;
        }
        match Severity::from_tracing(meta.level()) {
            Some(sev) => sev >= self.get(),
            None => false,
        }
    }

    fn callsite_enabled(&self, _meta: &'static Metadata<'static>) -> Interest {
        // The threshold can change at any time, so never let a callsite cache a verdict.
        Interest::sometimes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::{fmt, Layer};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_tracing_events_follow_threshold() {
        let level = AtomicLevel::new(Severity::Info);
        let out = Captured::default();
        let writer = out.clone();

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .with_filter(level.clone()),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden before switch");
            tracing::info!("shown before switch");

            level.set(Severity::Debug);
            tracing::debug!("shown after switch");
            tracing::trace!("trace never passes");

            level.set(Severity::Error);
            tracing::warn!("hidden at error");
        });

        let text = out.text();
        assert!(!text.contains("hidden before switch"));
        assert!(text.contains("shown before switch"));
        assert!(text.contains("shown after switch"));
        assert!(!text.contains("trace never passes"));
        assert!(!text.contains("hidden at error"));
    }
}
