//! UI collaborators of the request handler.
//!
//! The handler never touches a concrete front end. It writes into a
//! [`DisplayElement`] and raises blocking notices through a [`Notifier`];
//! a terminal, a test recorder or anything else can sit behind them.

use std::sync::{Mutex, MutexGuard};

/// Region whose content is replaced with status or result.
pub trait DisplayElement: Send + Sync {
    /// Replace the content with literal text.
    fn set_text(&self, text: &str);

    /// Replace the content with markup.
    fn set_html(&self, html: &str);
}

/// Blocking user-facing notice.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// What a display currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Text(String),
    Html(String),
}

impl Rendered {
    pub fn as_str(&self) -> &str {
        match self {
            Rendered::Text(s) | Rendered::Html(s) => s,
        }
    }
}

/// Display that keeps the latest content and a count of writes.
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    inner: Mutex<DisplayLog>,
}

#[derive(Debug, Default)]
struct DisplayLog {
    current: Option<Rendered>,
    history: Vec<Rendered>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Rendered> {
        self.lock().current.clone()
    }

    /// Every write in order, oldest first.
    pub fn history(&self) -> Vec<Rendered> {
        self.lock().history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, DisplayLog> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self, rendered: Rendered) {
        let mut log = self.lock();
        log.history.push(rendered.clone());
        log.current = Some(rendered);
    }
}

impl DisplayElement for MemoryDisplay {
    fn set_text(&self, text: &str) {
        self.write(Rendered::Text(text.to_string()));
    }

    fn set_html(&self, html: &str) {
        self.write(Rendered::Html(html.to_string()));
    }
}

/// Notifier that records alerts instead of showing them.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    alerts: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Notifier for MemoryNotifier {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_display_keeps_last_write() {
        let display = MemoryDisplay::new();
        assert!(display.current().is_none());

        display.set_text("Loading...");
        display.set_html("<pre>{}</pre>");

        assert_eq!(display.current(), Some(Rendered::Html("<pre>{}</pre>".into())));
        assert_eq!(display.history().len(), 2);
        assert_eq!(display.history()[0].as_str(), "Loading...");
    }

    #[test]
    fn memory_notifier_records_alerts() {
        let notifier = MemoryNotifier::new();
        notifier.alert("Enter a city");
        assert_eq!(notifier.alerts(), vec!["Enter a city".to_string()]);
    }
}
