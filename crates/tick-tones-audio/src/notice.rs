use log::info;

/// Raises short user-facing messages (the host's toast/notice area).
pub trait Notifier {
    fn notice(&self, message: &str);
}

/// Notifier for hosts without a notice area: writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notice(&self, message: &str) {
        info!("notice: {message}");
    }
}
