//! Cache key namespaces and TTL tiers.
//!
//! Keys follow `<entity>:<scope>`. Fixed keys can be invalidated by
//! namespace; page- and id-scoped keys only expire by TTL.

use std::time::Duration;

/// TTL tier for a cached listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttl(u64);

impl Ttl {
    /// Frequently edited content (news, Q&A).
    pub const VOLATILE: Ttl = Ttl(300);
    /// Occasionally edited content (albums).
    pub const MODERATE: Ttl = Ttl(600);
    /// Reference data (organizational chart, download forms).
    pub const STABLE: Ttl = Ttl(3600);

    pub const fn from_secs(secs: u64) -> Self {
        Ttl(secs)
    }

    pub const fn as_secs(self) -> u64 {
        self.0
    }

    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

pub const ORGANIZATIONAL_ALL: &str = "organizational:all";
pub const DOWNLOAD_FORMS_ALL: &str = "download_forms:all";
pub const ALBUMS_LIST: &str = "albums:list";
pub const QA_LIST: &str = "qa:list";

pub fn album_photos(album_id: i64) -> String {
    format!("albums:{album_id}:photos")
}

pub fn news_page(page: i64, per_page: i64) -> String {
    format!("news:list:{page}:{per_page}")
}

pub fn news_item(id: i64) -> String {
    format!("news:{id}")
}

/// An invalidatable group of fixed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Organizational,
    DownloadForms,
    Albums,
    Qa,
}

impl Namespace {
    /// Parse a namespace name as used by the invalidation endpoint.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "organizational" => Some(Namespace::Organizational),
            "download_forms" => Some(Namespace::DownloadForms),
            "albums" => Some(Namespace::Albums),
            "qa" => Some(Namespace::Qa),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Namespace::Organizational => "organizational",
            Namespace::DownloadForms => "download_forms",
            Namespace::Albums => "albums",
            Namespace::Qa => "qa",
        }
    }

    /// The known fixed keys belonging to this namespace.
    pub fn keys(self) -> Vec<String> {
        let fixed = match self {
            Namespace::Organizational => ORGANIZATIONAL_ALL,
            Namespace::DownloadForms => DOWNLOAD_FORMS_ALL,
            Namespace::Albums => ALBUMS_LIST,
            Namespace::Qa => QA_LIST,
        };
        vec![fixed.to_string()]
    }
}
