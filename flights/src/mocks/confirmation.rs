//! Mock confirmation host for testing.

use crate::providers::{ConfirmationHost, Dialog, DialogResponse};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    responses: VecDeque<Option<DialogResponse>>,
    opened: Vec<Dialog>,
}

/// Mock confirmation host.
///
/// Dialogs resolve with scripted responses in FIFO order; an unscripted
/// dialog resolves as dismissed (`None`).
#[derive(Debug, Clone, Default)]
pub struct MockConfirmationHost {
    inner: Arc<Mutex<Inner>>,
}

impl MockConfirmationHost {
    /// Create a mock with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the response for the next opened dialog.
    #[must_use]
    pub fn with_response(self, response: Option<DialogResponse>) -> Self {
        self.locked().responses.push_back(response);
        self
    }

    /// The dialogs opened so far, in order.
    #[must_use]
    pub fn opened(&self) -> Vec<Dialog> {
        self.locked().opened.clone()
    }
}

impl ConfirmationHost for MockConfirmationHost {
    fn open(&self, dialog: Dialog) -> impl Future<Output = Option<DialogResponse>> + Send {
        let response = {
            let mut inner = self.locked();
            inner.opened.push(dialog);
            inner.responses.pop_front().flatten()
        };
        async move { response }
    }
}
