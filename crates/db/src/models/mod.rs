pub mod album;
pub mod cookie_consent;
pub mod download_form;
pub mod election;
pub mod news;
pub mod organizational;
pub mod question;
