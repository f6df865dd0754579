//! Document models
//!
//! Shapes of the documents stored in the four MongoDB collections

mod note;
mod university;
mod user;

pub use note::Note;
pub use university::{Partition, University};
pub use user::{generate_user_id, User, UserUpdate, USER_ID_PREFIX, USER_ID_RANGE};
