//! Entity types - the four tables of the brewery graph
//!
//! Relationships are held as identifiers and resolved through the store:
//! - `Beer.brewery_id` → `Brewery`, mirrored by `Brewery.beer_ids`
//! - `Review.beer_id` → `Beer`, mirrored by `Beer.review_ids`
//! - `Review.user_id` → `User`, mirrored by `User.review_ids`

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The entity tables held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Brewery,
    Beer,
    User,
    Review,
}

impl EntityKind {
    /// Get the string representation of the entity kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Brewery => "brewery",
            EntityKind::Beer => "beer",
            EntityKind::User => "user",
            EntityKind::Review => "review",
        }
    }

    /// Name of the table (and of its data file, without extension)
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Brewery => "breweries",
            EntityKind::Beer => "beers",
            EntityKind::User => "users",
            EntityKind::Review => "reviews",
        }
    }

    /// All kinds, in load (dependency) order
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Brewery,
            EntityKind::Beer,
            EntityKind::User,
            EntityKind::Review,
        ]
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "brewery" | "breweries" => Ok(EntityKind::Brewery),
            "beer" | "beers" => Ok(EntityKind::Beer),
            "user" | "users" => Ok(EntityKind::User),
            "review" | "reviews" => Ok(EntityKind::Review),
            _ => Err(Error::InvalidArgument(format!("Unknown entity kind: {}", s))),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A brewery and the beers that point at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brewery {
    pub id: String,
    pub name: String,
    pub country: String,
    /// Back-references, in link order
    #[serde(default)]
    pub beer_ids: Vec<String>,
}

impl Brewery {
    pub fn new(id: impl Into<String>, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            beer_ids: Vec::new(),
        }
    }
}

/// A beer. `brewery_id` is `None` only for seed rows whose brewery was missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beer {
    pub id: String,
    pub name: String,
    pub style: String,
    pub brewery_id: Option<String>,
    #[serde(default)]
    pub review_ids: Vec<String>,
}

impl Beer {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        style: impl Into<String>,
        brewery_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            style: style.into(),
            brewery_id,
            review_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub review_ids: Vec<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            review_ids: Vec::new(),
        }
    }
}

/// A review always points at an existing beer and user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub text: String,
    pub rating: i32,
    pub beer_id: String,
    pub user_id: String,
}

impl Review {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        rating: i32,
        beer_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            rating,
            beer_id: beer_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Push `id` onto a back-reference list unless it is already there
pub(crate) fn push_unique(list: &mut Vec<String>, id: &str) {
    if !list.iter().any(|existing| existing == id) {
        list.push(id.to_string());
    }
}

/// Remove `id` from a back-reference list, if present
pub(crate) fn remove_id(list: &mut Vec<String>, id: &str) {
    list.retain(|existing| existing != id);
}
