pub use super::activity_logs::Entity as ActivityLogs;
pub use super::cameras::Entity as Cameras;
pub use super::parking_lots::Entity as ParkingLots;
pub use super::parking_spaces::Entity as ParkingSpaces;
pub use super::rating_feedbacks::Entity as RatingFeedbacks;
pub use super::sensors::Entity as Sensors;
pub use super::users::Entity as Users;
pub use super::vehicles::Entity as Vehicles;
