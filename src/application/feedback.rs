//! User-facing confirmations and short status messages.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

pub trait Feedback {
    fn notify(&self, message: &str, kind: ToastKind);

    /// Blocking yes/no question, e.g. before deleting a bot.
    fn confirm(&self, message: &str) -> bool;
}
