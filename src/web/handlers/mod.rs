pub mod dashboard_handlers;
pub mod system_handlers;

pub use dashboard_handlers::*;
pub use system_handlers::*;
