//! Notifier implementations.

use favs_core::notice::{Notice, NoticeLevel, Notifier};
use tokio::sync::mpsc;

/// Notifier that writes every notice to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::warn!(target: "favs::notice", "{}", notice.message),
            NoticeLevel::Success | NoticeLevel::Info => {
                tracing::info!(target: "favs::notice", "{}", notice.message)
            }
        }
    }
}

/// Notifier that forwards notices to a channel, e.g. a UI toast queue.
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    /// Create a notifier with the given channel sender
    pub fn new(sender: mpsc::UnboundedSender<Notice>) -> Self {
        Self { sender }
    }

    /// Creates a notifier together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        // Non-blocking send - if the receiver is dropped, we just skip
        let _ = self.sender.send(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_channel_notifier_delivers_in_order() {
        let (notifier, mut receiver) = ChannelNotifier::channel();
        notifier.notify(Notice::success("added"));
        notifier.notify(Notice::error("login required"));

        assert_eq!(receiver.try_recv().unwrap(), Notice::success("added"));
        assert_eq!(receiver.try_recv().unwrap(), Notice::error("login required"));
        assert!(receiver.try_recv().is_err());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracing_notifier_logs_by_level() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingNotifier.notify(Notice::success("\"Huile\" added to favorites"));
            TracingNotifier.notify(Notice::error("Please log in to manage your favorites"));
        });

        let output = log.contents();
        let added = output
            .lines()
            .find(|line| line.contains("added to favorites"))
            .unwrap();
        assert!(added.contains("INFO"));
        assert!(added.contains("favs::notice"));
        let rejected = output
            .lines()
            .find(|line| line.contains("Please log in"))
            .unwrap();
        assert!(rejected.contains("WARN"));
    }

    #[test]
    fn test_channel_notifier_ignores_dropped_receiver() {
        let (notifier, receiver) = ChannelNotifier::channel();
        drop(receiver);
        notifier.notify(Notice::info("nobody listens"));
    }
}
