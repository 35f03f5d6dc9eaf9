pub mod link;
pub mod paypal;
pub mod sandbox;
