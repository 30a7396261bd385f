//! Repository layer: one unit struct per table, async associated functions
//! taking a `&PgPool`.

pub mod album_repo;
pub mod cookie_consent_repo;
pub mod download_form_repo;
pub mod election_repo;
pub mod news_repo;
pub mod organizational_repo;
pub mod question_repo;

pub use album_repo::AlbumRepo;
pub use cookie_consent_repo::CookieConsentRepo;
pub use download_form_repo::DownloadFormRepo;
pub use election_repo::ElectionRepo;
pub use news_repo::NewsRepo;
pub use organizational_repo::OrganizationalRepo;
pub use question_repo::QuestionRepo;
