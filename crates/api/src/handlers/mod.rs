pub mod albums;
pub mod cache;
pub mod cookie_consent;
pub mod download_forms;
pub mod elections;
pub mod files;
pub mod news;
pub mod organizational;
pub mod qa;
