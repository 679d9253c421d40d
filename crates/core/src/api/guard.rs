//! Deadline guard: runs the pipeline on an abandonable worker thread under
//! a hard wall-clock budget.
//!
//! The caller blocks on the channel for at most the configured limit and
//! always gets exactly one of: the ordered output, Timeout, or a typed
//! failure. An abandoned worker owns its entire working set (plane, boxes,
//! records cloned in at spawn), so nothing shared can be left half-written.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{RecvTimeoutError, sync_channel};
use std::time::Duration;

use log::warn;

use super::high_level::{ExtractOptions, run_pipeline};
use crate::converter::ParagraphRecord;
use crate::error::{ExtractError, Result};
use crate::layout::Page;

/// Cooperative cancellation flag shared with the worker. Checked between
/// pages and stages; once set, the worker winds down instead of finishing
/// work nobody will read.
#[derive(Clone, Default)]
pub(crate) struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub(crate) fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub(crate) fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub(crate) fn run_with_deadline(
    pages: &[Page],
    options: &ExtractOptions,
    limit: Duration,
) -> Result<Vec<ParagraphRecord>> {
    let pages = pages.to_vec();
    let options = options.clone();
    let cancel = CancelFlag::default();
    let worker_cancel = cancel.clone();
    let (tx, rx) = sync_channel(1);

    std::thread::Builder::new()
        .name("lineweave-extract".into())
        .spawn(move || {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                run_pipeline(&pages, &options, &worker_cancel)
            }))
            .unwrap_or_else(|payload| {
                Err(ExtractError::Extraction {
                    detail: panic_detail(payload),
                })
            });
            // The receiver is gone if the deadline already passed.
            let _ = tx.send(outcome);
        })?;

    match rx.recv_timeout(limit) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => {
            cancel.set();
            warn!("extraction exceeded the {limit:?} deadline, abandoning worker");
            Err(ExtractError::Timeout)
        }
        Err(RecvTimeoutError::Disconnected) => Err(ExtractError::Extraction {
            detail: "extraction worker exited without reporting a result".into(),
        }),
    }
}

fn panic_detail(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("extraction worker panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("extraction worker panicked: {s}")
    } else {
        "extraction worker panicked with a non-string payload".to_string()
    }
}
