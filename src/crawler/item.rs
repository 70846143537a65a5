//! Capture items
//!
//! A capture item is one URL scheduled for fetching, together with its
//! lineage. Items form a tree through shared, read-only `Arc` parent
//! handles; a child never mutates its parent.

use crate::url::dedup_hash;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Kind of resource an item points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// Root URL supplied by the operator
    Seed,
    /// Page discovered through an outlink
    Page,
    /// Resource referenced by a page (image, script, stylesheet, ...)
    Asset,
}

impl ItemType {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Page => "page",
            Self::Asset => "asset",
        }
    }

}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_string())
    }
}

/// One URL to capture
#[derive(Debug)]
pub struct CaptureItem {
    url: Url,
    parent: Option<Arc<CaptureItem>>,
    item_type: ItemType,
    hop: u32,
    redirect: u32,
    hash: String,
}

impl CaptureItem {
    /// Creates an item discovered from `parent`
    ///
    /// `hop` is the page-to-page distance from the seed; the redirect
    /// counter starts at zero.
    pub fn new(url: Url, parent: Option<Arc<CaptureItem>>, item_type: ItemType, hop: u32) -> Self {
        let hash = dedup_hash(&url);
        Self {
            url,
            parent,
            item_type,
            hop,
            redirect: 0,
            hash,
        }
    }

    /// Creates a root item with no parent
    pub fn seed(url: Url) -> Self {
        Self::new(url, None, ItemType::Seed, 0)
    }

    /// Creates the item for the next hop of a redirect chain
    ///
    /// Parent, type and hop are inherited; the redirect counter grows by one.
    pub fn redirected(&self, url: Url) -> Self {
        let mut next = Self::new(url, self.parent.clone(), self.item_type, self.hop);
        next.redirect = self.redirect.saturating_add(1);
        next
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn parent(&self) -> Option<&Arc<CaptureItem>> {
        self.parent.as_ref()
    }

    /// URL of the parent item, used as the `Referer`
    pub fn parent_url(&self) -> Option<&Url> {
        self.parent.as_ref().map(|p| p.url())
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn hop(&self) -> u32 {
        self.hop
    }

    pub fn redirect(&self) -> u32 {
        self.redirect
    }

    /// Dedup key of this item
    pub fn hash(&self) -> &str {
        &self.hash
    }
}
