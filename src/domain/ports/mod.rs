pub mod identity_provider;
pub mod operation_repository;
pub mod payment_gateway;
