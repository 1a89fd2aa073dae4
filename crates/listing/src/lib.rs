mod default_list;
mod handle;
pub mod paginator;
pub mod pipeline;
mod selection;
mod store;
mod view;

pub use default_list::{DefaultListPolicy, pick_default};
pub use handle::{SharedView, ViewHandle};
pub use paginator::{Page, paginate, total_pages};
pub use pipeline::filter;
pub use selection::{Selection, SelectionState};
pub use store::ItemStore;
pub use view::{ListView, PageView, PendingFlags};
