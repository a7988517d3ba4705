use asset_deps::prelude::*;
use std::sync::{Arc, Mutex};

/// One call observed by [`MockProgressReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reported {
    Info(String),
    Progress { current: usize, total: usize },
    Error(String),
    Completion(String),
}

impl Reported {
    fn text(&self) -> Option<&str> {
        match self {
            Reported::Info(text) | Reported::Error(text) | Reported::Completion(text) => {
                Some(text)
            }
            Reported::Progress { .. } => None,
        }
    }
}

/// Mock ProgressReporter that records every call; clones share the log
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    events: Arc<Mutex<Vec<Reported>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Reported> {
        self.events.lock().unwrap().clone()
    }

    /// True when any text message contains `fragment`
    pub fn contains(&self, fragment: &str) -> bool {
        self.events()
            .iter()
            .filter_map(Reported::text)
            .any(|text| text.contains(fragment))
    }

    /// True when an error-channel message contains `fragment`
    pub fn has_error(&self, fragment: &str) -> bool {
        self.events()
            .iter()
            .any(|event| matches!(event, Reported::Error(text) if text.contains(fragment)))
    }

    /// Last `(processed, total)` pair seen
    pub fn last_progress(&self) -> Option<(usize, usize)> {
        self.events().iter().rev().find_map(|event| match event {
            Reported::Progress { current, total } => Some((*current, *total)),
            _ => None,
        })
    }

    fn record(&self, event: Reported) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.record(Reported::Info(message.to_string()));
    }

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.record(Reported::Progress { current, total });
    }

    fn report_error(&self, message: &str) {
        self.record(Reported::Error(message.to_string()));
    }

    fn report_completion(&self, message: &str) {
        self.record(Reported::Completion(message.to_string()));
    }
}
