pub mod parking_lot;
pub mod user;
pub mod vehicle;
