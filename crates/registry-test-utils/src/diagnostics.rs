//! Capture of `tracing` warnings for assertions.

use std::sync::{Arc, Mutex};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// Warnings recorded by [`CapturedWarnings::install`].
///
/// The subscriber is installed for the current thread only, so use it with
/// a current-thread runtime (the `#[tokio::test]` default).
#[derive(Debug, Clone, Default)]
pub struct CapturedWarnings {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CapturedWarnings {
    /// Start capturing. Capturing stops when the returned guard is dropped.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let captured = Self::default();
        let subscriber = Registry::default().with(WarningLayer {
            messages: captured.messages.clone(),
        });
        let guard = tracing::subscriber::set_default(subscriber);
        (captured, guard)
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.messages().len()
    }
}

struct WarningLayer {
    messages: Arc<Mutex<Vec<String>>>,
}

impl<S: Subscriber> Layer<S> for WarningLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(visitor.message);
        }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}
