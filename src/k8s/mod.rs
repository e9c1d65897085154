pub mod resources;

pub use resources::{AccessReview, PermissionQuery, get_server_version, review_access};
