pub mod prelude;

pub mod activity_logs;
pub mod cameras;
pub mod parking_lots;
pub mod parking_spaces;
pub mod rating_feedbacks;
pub mod sensors;
pub mod users;
pub mod vehicles;
