//! Redirect entity: a slug mapped to its target, admin key and click counter.

use std::fmt;

use subtle::ConstantTimeEq;

/// A stored redirect record.
///
/// The admin key is a bearer secret; the `Debug` implementation redacts it so
/// records can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Redirect {
    pub slug: String,
    pub target_url: String,
    pub admin_key: String,
    pub clicks: u64,
}

impl Redirect {
    /// Creates a new Redirect instance.
    pub fn new(slug: String, target_url: String, admin_key: String, clicks: u64) -> Self {
        Self {
            slug,
            target_url,
            admin_key,
            clicks,
        }
    }

    /// Returns `true` if `candidate` is exactly this record's admin key.
    ///
    /// Compared in constant time over the key bytes.
    pub fn is_authorized(&self, candidate: &str) -> bool {
        self.admin_key.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Redirect")
            .field("slug", &self.slug)
            .field("target_url", &self.target_url)
            .field("admin_key", &"<redacted>")
            .field("clicks", &self.clicks)
            .finish()
    }
}

/// Input data for registering a new redirect. The click counter starts at zero.
#[derive(Clone, PartialEq, Eq)]
pub struct NewRedirect {
    pub slug: String,
    pub target_url: String,
    pub admin_key: String,
}

impl fmt::Debug for NewRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewRedirect")
            .field("slug", &self.slug)
            .field("target_url", &self.target_url)
            .field("admin_key", &"<redacted>")
            .finish()
    }
}

impl From<NewRedirect> for Redirect {
    fn from(new: NewRedirect) -> Self {
        Redirect::new(new.slug, new.target_url, new.admin_key, 0)
    }
}
