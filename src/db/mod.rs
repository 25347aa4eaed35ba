pub mod journals;
pub mod pool;

pub use journals::{JournalStore, PgJournalStore};
pub use pool::create_pool;
