pub mod parking_lot;
pub mod user;
pub mod vehicle;

pub use parking_lot::{Lifecycle, NewParkingLot, ParkingLot, ParkingLotUpdate};
pub use user::User;
pub use vehicle::Vehicle;
