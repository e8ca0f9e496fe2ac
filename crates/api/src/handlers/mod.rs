pub mod admin;
pub mod assets;
pub mod capabilities;
pub mod courses;
pub mod fallback;
pub mod github;
pub mod home;
pub mod me;
pub mod resources;
pub mod sso;
