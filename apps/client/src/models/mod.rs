pub mod job;
pub mod user;

pub use job::JobListing;
pub use user::{UserPreferences, UserSession};
