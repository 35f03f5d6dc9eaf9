pub mod migrations;
pub mod operation_repo;
