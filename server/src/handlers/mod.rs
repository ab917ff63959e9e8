pub mod search_handlers;
pub mod summary_handlers;
