pub mod apply;
pub mod filter;
pub mod lookup;
pub mod notify;
pub mod page;
pub mod pagination;
pub mod sequence;
pub mod state;

pub use apply::{ApplyGate, ApplyPhase};
pub use lookup::ApplicationLookup;
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use page::CareersPage;
pub use pagination::Pagination;
pub use state::{PageState, SliceStatus};
