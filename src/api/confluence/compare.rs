//
//  atlassian-api
//  api/confluence/compare.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Content comparison strategies.
//!
//! Before writing a page, the update operations ask a [`ContentComparator`]
//! whether the stored body already equals the desired one. Returning `true`
//! skips the write entirely.
//!
//! Any `Fn(&str, &str) -> bool` closure is a comparator, taking the stored
//! body first and the desired body second.

use std::borrow::Cow;

/// Decides whether a page already holds the desired body.
pub trait ContentComparator: Send + Sync {
    /// Returns `true` if `current` (as stored by the server) already equals
    /// `desired`.
    fn is_same(&self, current: &str, desired: &str) -> bool;
}

impl<F> ContentComparator for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn is_same(&self, current: &str, desired: &str) -> bool {
        self(current, desired)
    }
}

/// The default comparator.
///
/// Confluence re-encodes `ó` as `&oacute;` when it stores a body, so a body
/// written verbatim would otherwise never compare equal to itself. The
/// stored body is normalized with [`normalize_entities`]; the desired body is
/// compared as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityNormalizedComparator;

impl ContentComparator for EntityNormalizedComparator {
    fn is_same(&self, current: &str, desired: &str) -> bool {
        normalize_entities(current) == desired
    }
}

/// Replaces the HTML entities Confluence introduces on storage.
///
/// Only `&oacute;` is handled.
pub fn normalize_entities(body: &str) -> Cow<'_, str> {
    if body.contains("&oacute;") {
        Cow::Owned(body.replace("&oacute;", "ó"))
    } else {
        Cow::Borrowed(body)
    }
}
