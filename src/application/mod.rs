pub mod form;
pub mod list_operations;
pub mod save_operation;
pub mod session;
pub mod summary;
pub mod upgrade;
