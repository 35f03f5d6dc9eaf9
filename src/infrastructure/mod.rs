pub mod firestore;
pub mod identity;
pub mod payments;
pub mod sqlite;
