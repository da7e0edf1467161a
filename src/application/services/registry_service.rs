//! Redirect registry: slug lifecycle and admin key authorization.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::click_counter::spawn_click_increment;
use crate::domain::entities::NewRedirect;
use crate::domain::repositories::RedirectRepository;
use crate::error::RegistryError;
use crate::utils::code_generator::{generate_admin_key, generate_slug, is_addressable_slug};
use crate::utils::url_validator::is_valid_target_url;

/// Default number of fresh slugs tried before creation gives up.
pub const DEFAULT_SLUG_MAX_ATTEMPTS: usize = 10;

/// Identifiers handed back to the creator of a redirect.
///
/// The admin key is only ever returned here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRedirect {
    pub slug: String,
    pub key: String,
}

/// Outcome of a successful resolve.
#[derive(Debug)]
pub struct Resolved {
    pub target_url: String,
    /// Detached click counter increment. Dropping the handle does not cancel it.
    pub click_task: JoinHandle<()>,
}

/// Service owning the slug → redirect mapping.
///
/// Holds no mutable state of its own; every invariant is enforced against the
/// injected [`RedirectRepository`].
pub struct RedirectRegistry {
    repository: Arc<dyn RedirectRepository>,
    slug_max_attempts: usize,
}

impl RedirectRegistry {
    /// Creates a new registry over `repository`.
    pub fn new(repository: Arc<dyn RedirectRepository>) -> Self {
        Self {
            repository,
            slug_max_attempts: DEFAULT_SLUG_MAX_ATTEMPTS,
        }
    }

    /// Overrides how many slugs are tried before creation fails.
    pub fn with_slug_max_attempts(mut self, attempts: usize) -> Self {
        self.slug_max_attempts = attempts.max(1);
        self
    }

    /// Registers `url` under a fresh slug and returns the slug and its admin key.
    ///
    /// Slugs are inserted first-writer-wins; on collision a new slug is drawn,
    /// up to the configured number of attempts.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::MissingParameter`] if `url` is absent or empty
    /// - [`RegistryError::InvalidUrl`] if `url` is not a bare `http(s)://host.tld`
    /// - [`RegistryError::GenerationFailure`] if randomness is unavailable or every slug collided
    /// - [`RegistryError::PersistenceFailure`] on store errors
    pub async fn create(&self, url: Option<&str>) -> Result<CreatedRedirect, RegistryError> {
        let url = url
            .filter(|u| !u.is_empty())
            .ok_or(RegistryError::MissingParameter)?;

        if !is_valid_target_url(url) {
            return Err(RegistryError::InvalidUrl);
        }

        let key = generate_admin_key()?;

        for attempt in 1..=self.slug_max_attempts {
            let slug = generate_slug()?;
            let new_redirect = NewRedirect {
                slug: slug.clone(),
                target_url: url.to_string(),
                admin_key: key.clone(),
            };

            let inserted = self
                .repository
                .insert_if_absent(new_redirect)
                .await
                .map_err(RegistryError::PersistenceFailure)?;

            if inserted {
                info!(slug = %slug, target = %url, "Redirect registered");
                return Ok(CreatedRedirect { slug, key });
            }

            warn!(slug = %slug, attempt, "Slug collision, drawing a new one");
        }

        Err(RegistryError::GenerationFailure(format!(
            "no free slug after {} attempts",
            self.slug_max_attempts
        )))
    }

    /// Looks up the target for `slug` and schedules a click increment.
    ///
    /// The increment runs on its own task; its failure never affects the result.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::MissingSlug`] if `slug` is empty or the bare sentinel
    /// - [`RegistryError::NotFound`] if no record exists
    /// - [`RegistryError::LookupFailure`] on store errors
    pub async fn resolve(&self, slug: &str) -> Result<Resolved, RegistryError> {
        if !is_addressable_slug(slug) {
            return Err(RegistryError::MissingSlug);
        }

        let redirect = self
            .repository
            .find(slug)
            .await
            .map_err(RegistryError::LookupFailure)?
            .ok_or(RegistryError::NotFound)?;

        debug!(slug = %slug, target = %redirect.target_url, "Redirect resolved");

        let click_task = spawn_click_increment(self.repository.clone(), slug.to_string());

        Ok(Resolved {
            target_url: redirect.target_url,
            click_task,
        })
    }

    /// Returns the click counter for `slug` as a decimal string.
    ///
    /// Unknown slugs fail closed as [`RegistryError::Unauthorized`], so the
    /// response does not reveal whether a slug exists.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::MissingSlug`] / [`RegistryError::MissingKey`] on missing input
    /// - [`RegistryError::Unauthorized`] if the key does not match
    /// - [`RegistryError::LookupFailure`] on store errors
    pub async fn stats(&self, slug: &str, key: Option<&str>) -> Result<String, RegistryError> {
        if !is_addressable_slug(slug) {
            return Err(RegistryError::MissingSlug);
        }
        let key = key
            .filter(|k| !k.is_empty())
            .ok_or(RegistryError::MissingKey)?;

        let redirect = self
            .repository
            .find(slug)
            .await
            .map_err(RegistryError::LookupFailure)?;

        match redirect {
            Some(redirect) if redirect.is_authorized(key) => Ok(redirect.clicks.to_string()),
            _ => {
                warn!(slug = %slug, "Rejected stats request with wrong admin key");
                Err(RegistryError::Unauthorized)
            }
        }
    }

    /// Deletes `slug` after verifying the admin key.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::MissingSlug`] / [`RegistryError::MissingKey`] on missing input
    /// - [`RegistryError::NotFound`] if no record exists
    /// - [`RegistryError::Unauthorized`] if the key does not match
    /// - [`RegistryError::LookupFailure`] if the record cannot be read
    /// - [`RegistryError::DeletionFailure`] if the removal fails
    pub async fn delete(&self, slug: &str, key: Option<&str>) -> Result<(), RegistryError> {
        if !is_addressable_slug(slug) {
            return Err(RegistryError::MissingSlug);
        }
        let key = key
            .filter(|k| !k.is_empty())
            .ok_or(RegistryError::MissingKey)?;

        let redirect = self
            .repository
            .find(slug)
            .await
            .map_err(RegistryError::LookupFailure)?
            .ok_or(RegistryError::NotFound)?;

        if !redirect.is_authorized(key) {
            warn!(slug = %slug, "Rejected delete request with wrong admin key");
            return Err(RegistryError::Unauthorized);
        }

        self.repository
            .delete(slug)
            .await
            .map_err(RegistryError::DeletionFailure)?;

        info!(slug = %slug, "Redirect deleted");
        Ok(())
    }

    /// Checks if the underlying store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.repository.health_check().await
    }
}
