// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod error;
mod metrics;
mod visitor;

pub use error::HttpStatusError;
pub use self::metrics::metrics_handler;
pub(crate) use visitor::visitor_info;
pub use visitor::VisitorInfo;
