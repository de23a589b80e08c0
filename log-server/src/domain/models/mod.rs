pub mod log_meta;
pub mod log_record;
pub mod query_options;
pub mod retention;

// Re-export specific items for easier access
pub use log_meta::*;
pub use log_record::*;
pub use query_options::*;
pub use retention::*;
