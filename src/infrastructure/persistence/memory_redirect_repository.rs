//! In-memory implementation of the redirect repository.
//!
//! Stores the same positional lists as Redis so the record layout is exercised
//! without a server. Intended for tests and local experiments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::record_codec::{self, CLICKS_INDEX, RECORD_LEN};
use crate::domain::entities::{NewRedirect, Redirect};
use crate::domain::repositories::{RedirectRepository, StoreError};

/// Redirect storage backed by a `HashMap` of lists.
#[derive(Debug, Default)]
pub struct MemoryRedirectRepository {
    lists: RwLock<HashMap<String, Vec<String>>>,
    failing: AtomicBool,
    increments: AtomicUsize,
}

impl MemoryRedirectRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a raw list under `slug`, bypassing the codec.
    ///
    /// Used to seed records in layouts older releases produced.
    pub async fn insert_raw(&self, slug: &str, fields: Vec<String>) {
        self.lists.write().await.insert(slug.to_string(), fields);
    }

    /// Returns the raw list stored under `slug`.
    pub async fn raw(&self, slug: &str) -> Option<Vec<String>> {
        self.lists.read().await.get(slug).cloned()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.lists.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.lists.read().await.is_empty()
    }

    /// Makes every subsequent operation fail with [`StoreError::Backend`] while `true`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of click increments attempted so far, successful or not.
    pub fn increment_attempts(&self) -> usize {
        self.increments.load(Ordering::SeqCst)
    }

    async fn apply_increment(&self, slug: &str) -> Result<Option<u64>, StoreError> {
        self.check_available()?;

        let mut lists = self.lists.write().await;
        let Some(fields) = lists.get_mut(slug) else {
            return Ok(None);
        };

        let corrupt = |reason: &str| StoreError::Corrupt {
            slug: slug.to_string(),
            reason: reason.to_string(),
        };

        let index = CLICKS_INDEX as usize;
        let clicks = match fields.len() {
            0 | 1 => return Err(corrupt("admin key missing")),
            2 => {
                fields.push("1".to_string());
                1
            }
            RECORD_LEN => {
                let clicks = record_codec::parse_clicks(slug, &fields[index])? + 1;
                fields[index] = clicks.to_string();
                clicks
            }
            _ => return Err(corrupt("unexpected trailing element(s)")),
        };

        Ok(Some(clicks))
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Backend("memory store marked as failing".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RedirectRepository for MemoryRedirectRepository {
    async fn insert_if_absent(&self, new_redirect: NewRedirect) -> Result<bool, StoreError> {
        self.check_available()?;

        let mut lists = self.lists.write().await;
        if lists.contains_key(&new_redirect.slug) {
            return Ok(false);
        }

        let fields = record_codec::encode(&new_redirect).to_vec();
        lists.insert(new_redirect.slug, fields);
        Ok(true)
    }

    async fn find(&self, slug: &str) -> Result<Option<Redirect>, StoreError> {
        self.check_available()?;

        let fields = self.lists.read().await.get(slug).cloned();
        match fields {
            Some(fields) => record_codec::decode(slug, fields),
            None => Ok(None),
        }
    }

    async fn increment_clicks(&self, slug: &str) -> Result<Option<u64>, StoreError> {
        let result = self.apply_increment(slug).await;
        self.increments.fetch_add(1, Ordering::SeqCst);
        result
    }

    async fn delete(&self, slug: &str) -> Result<bool, StoreError> {
        self.check_available()?;

        Ok(self.lists.write().await.remove(slug).is_some())
    }

    async fn health_check(&self) -> bool {
        self.check_available().is_ok()
    }
}
