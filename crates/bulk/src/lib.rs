mod coordinator;
mod direction;
mod notify;
mod outcome;

pub use coordinator::{BulkConfig, BulkCoordinator, DispatchMode};
pub use direction::infer_direction;
pub use notify::{
    Level, Navigator, Notification, NotificationLog, Notifier, TracingNavigator, TracingNotifier,
};
pub use outcome::{BulkAction, Outcome, Settled};
