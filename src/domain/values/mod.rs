pub mod payment_method;
pub mod plan;
pub mod session_state;
