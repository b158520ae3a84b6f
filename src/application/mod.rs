//! Page-independent machinery: polling units, chart ownership, the bot form
//! state machine, sorting and localisation.

pub mod bot_form;
pub mod chart_adapter;
pub mod feedback;
pub mod history_sort;
pub mod localization;
pub mod poll_unit;
pub mod sequence;

pub use feedback::{Feedback, ToastKind};
pub use poll_unit::{PageScope, PollHandle, PollUnit, Presenter, RefreshOutcome, RenderTarget};
