pub mod operation_repo;
