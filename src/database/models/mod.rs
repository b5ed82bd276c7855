pub mod difficulty;
pub mod image;
pub mod region;
pub mod user;
pub mod walk;

pub use difficulty::Difficulty;
pub use image::Image;
pub use region::Region;
pub use user::User;
pub use walk::Walk;
