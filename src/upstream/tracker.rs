use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::{AbortHandle, abortable};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("request for {selector} was superseded by a newer one on {slot}")]
    Superseded { slot: String, selector: String },
}

struct InFlight {
    request_id: Uuid,
    selector: String,
    handle: AbortHandle,
}

/// Keeps at most one live fetch per dashboard slot (user + view).
///
/// Starting a request on a busy slot aborts the older one; a result that
/// finishes after being replaced is dropped instead of returned.
#[derive(Default)]
pub struct RequestTracker {
    inflight: Mutex<HashMap<String, InFlight>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, InFlight>> {
        self.inflight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn run<F>(&self, slot: &str, selector: &str, fut: F) -> Result<F::Output, TrackerError>
    where
        F: Future,
    {
        let (task, handle) = abortable(fut);
        let request_id = Uuid::new_v4();

        let previous = self.slots().insert(
            slot.to_string(),
            InFlight {
                request_id,
                selector: selector.to_string(),
                handle,
            },
        );
        if let Some(previous) = previous {
            debug!(
                slot,
                request_id = %previous.request_id,
                superseded = %previous.selector,
                by = selector,
                "Aborting superseded request"
            );
            previous.handle.abort();
        }

        let outcome = task.await;

        let still_current = {
            let mut slots = self.slots();
            let current = slots.get(slot).map(|f| f.request_id) == Some(request_id);
            if current {
                slots.remove(slot);
            }
            current
        };

        match outcome {
            Ok(output) if still_current => Ok(output),
            _ => Err(TrackerError::Superseded {
                slot: slot.to_string(),
                selector: selector.to_string(),
            }),
        }
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.slots().len()
    }
}
