//! Notification boundary between the conversion worker and the UI thread.
//!
//! The worker holds a [`Notifier`]; the UI holds the receiving end of an
//! unbounded `tokio::sync::mpsc` channel and drains it with `try_recv` each
//! frame.  Every message also fires an optional waker so an idle UI repaints
//! promptly.
//!
//! Per run the UI sees, in order:
//!
//! ```text
//! Status("Converting file to audio... Please wait.")
//! Finished(ConversionOutcome)      exactly once
//! Ready                            exactly once, always last
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use super::outcome::ConversionOutcome;

/// A message from the worker to the interactive thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Progress text for the status line.
    Status(String),
    /// The run's terminal outcome.
    Finished(ConversionOutcome),
    /// The pipeline is ready for the next request.
    Ready,
}

/// Callback run after every notification is queued.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Sending half of the notification channel.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
    waker: Option<Waker>,
}

impl Notifier {
    pub fn status(&self, text: impl Into<String>) {
        self.send(Notification::Status(text.into()));
    }

    pub fn finished(&self, outcome: ConversionOutcome) {
        self.send(Notification::Finished(outcome));
    }

    pub fn ready(&self) {
        self.send(Notification::Ready);
    }

    /// A guard that sends [`Notification::Ready`] when dropped.
    pub fn ready_guard(&self) -> ReadyGuard {
        ReadyGuard {
            notifier: self.clone(),
        }
    }

    fn send(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            // The window was closed mid-run.
            log::debug!("notify: receiver dropped, notification discarded");
            return;
        }
        if let Some(wake) = &self.waker {
            wake();
        }
    }
}

/// Sends [`Notification::Ready`] exactly once, on drop.
///
/// Created at the top of a run so the signal fires after the terminal
/// outcome on every exit path, unwinding included.
pub struct ReadyGuard {
    notifier: Notifier,
}

impl Drop for ReadyGuard {
    fn drop(&mut self) {
        self.notifier.ready();
    }
}

/// A notification channel without a waker.
pub fn channel() -> (Notifier, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Notifier { tx, waker: None }, rx)
}

/// A notification channel that calls `waker` after each message.
pub fn channel_with_waker(
    waker: impl Fn() + Send + Sync + 'static,
) -> (Notifier, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        Notifier {
            tx,
            waker: Some(Arc::new(waker)),
        },
        rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn drain(rx: &mut mpsc::UnboundedReceiver<Notification>) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(n) = rx.try_recv() {
            out.push(n);
        }
        out
    }

    #[test]
    fn messages_arrive_in_send_order() {
        let (notifier, mut rx) = channel();
        notifier.status("working");
        notifier.ready();

        assert_eq!(
            drain(&mut rx),
            vec![Notification::Status("working".into()), Notification::Ready]
        );
    }

    #[test]
    fn guard_sends_ready_once_on_drop() {
        let (notifier, mut rx) = channel();
        {
            let _guard = notifier.ready_guard();
            notifier.status("inside");
        }

        assert_eq!(
            drain(&mut rx),
            vec![Notification::Status("inside".into()), Notification::Ready]
        );
    }

    #[test]
    fn guard_fires_during_unwind() {
        let (notifier, mut rx) = channel();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = notifier.ready_guard();
            panic!("stage blew up");
        }));

        assert!(result.is_err());
        assert_eq!(drain(&mut rx), vec![Notification::Ready]);
    }

    #[test]
    fn waker_runs_per_message() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        let (notifier, _rx) = channel_with_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        notifier.status("a");
        notifier.ready();
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn closed_receiver_is_not_an_error() {
        let (notifier, rx) = channel();
        drop(rx);
        notifier.status("nobody listening");
        notifier.ready();
    }
}
