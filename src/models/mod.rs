pub mod course;
pub mod user;

pub use course::{Course, NewCourse};
pub use user::{NewUser, User, UserRef};
