//! Positional list layout of a redirect record.
//!
//! A record is stored as the list `[target_url, admin_key, click_count]`.
//! Records written by older releases lack the third element and are read as
//! having zero clicks. This module is the only place that knows the layout.

use crate::domain::entities::{NewRedirect, Redirect};
use crate::domain::repositories::StoreError;

const TARGET_INDEX: isize = 0;
const ADMIN_KEY_INDEX: isize = 1;
/// List index of the click counter.
pub const CLICKS_INDEX: isize = 2;

/// Encodes a new record with its counter set to zero.
pub fn encode(new_redirect: &NewRedirect) -> [String; 3] {
    [
        new_redirect.target_url.clone(),
        new_redirect.admin_key.clone(),
        "0".to_string(),
    ]
}

/// Number of elements in a current-layout record.
pub const RECORD_LEN: usize = 3;

/// Parses a stored click counter.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] if `raw` is not a non-negative integer.
pub fn parse_clicks(slug: &str, raw: &str) -> Result<u64, StoreError> {
    raw.parse::<u64>().map_err(|_| StoreError::Corrupt {
        slug: slug.to_string(),
        reason: format!("click counter {raw:?} is not a number"),
    })
}

/// Decodes the stored list for `slug`.
///
/// An empty list or an empty target means the record does not exist.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] if the list is missing the admin key, has
/// extra elements, or carries a non-numeric counter.
pub fn decode(slug: &str, mut fields: Vec<String>) -> Result<Option<Redirect>, StoreError> {
    let corrupt = |reason: String| StoreError::Corrupt {
        slug: slug.to_string(),
        reason,
    };

    let mut take = |index: isize| fields.get_mut(index as usize).map(std::mem::take);

    let target_url = match take(TARGET_INDEX) {
        Some(target) if !target.is_empty() => target,
        _ => return Ok(None),
    };
    let admin_key =
        take(ADMIN_KEY_INDEX).ok_or_else(|| corrupt("admin key missing".to_string()))?;
    let clicks = match take(CLICKS_INDEX) {
        Some(raw) => parse_clicks(slug, &raw)?,
        None => 0,
    };

    if fields.len() > RECORD_LEN {
        let extra = fields.len() - RECORD_LEN;
        return Err(corrupt(format!("{extra} unexpected trailing element(s)")));
    }

    Ok(Some(Redirect::new(
        slug.to_string(),
        target_url,
        admin_key,
        clicks,
    )))
}
