//! On-disk record layout
//!
//! Each table is written as a JSON array of flat records: scalar attributes
//! plus foreign-key id strings, never nested objects.
//! - breweries: `id, name, country`
//! - beers: `id, name, style, breweryId`
//! - users: `id, name, email`
//! - reviews: `id, text, rating, beerId, userId`

use serde::{Deserialize, Serialize};

use crate::model::{Beer, Brewery, EntityKind, Review, User};
use crate::store::Table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreweryRecord {
    pub id: String,
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerRecord {
    pub id: String,
    pub name: String,
    pub style: String,
    pub brewery_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: String,
    pub text: String,
    pub rating: i32,
    pub beer_id: String,
    pub user_id: String,
}

impl From<&Brewery> for BreweryRecord {
    fn from(b: &Brewery) -> Self {
        Self {
            id: b.id.clone(),
            name: b.name.clone(),
            country: b.country.clone(),
        }
    }
}

impl From<&Beer> for BeerRecord {
    fn from(b: &Beer) -> Self {
        Self {
            id: b.id.clone(),
            name: b.name.clone(),
            style: b.style.clone(),
            brewery_id: b.brewery_id.clone(),
        }
    }
}

impl From<&User> for UserRecord {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

impl From<&Review> for ReviewRecord {
    fn from(r: &Review) -> Self {
        Self {
            id: r.id.clone(),
            text: r.text.clone(),
            rating: r.rating,
            beer_id: r.beer_id.clone(),
            user_id: r.user_id.clone(),
        }
    }
}

/// Full contents of one table, ready to be written out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Snapshot {
    Breweries(Vec<BreweryRecord>),
    Beers(Vec<BeerRecord>),
    Users(Vec<UserRecord>),
    Reviews(Vec<ReviewRecord>),
}

impl Snapshot {
    pub fn breweries(table: &Table<Brewery>) -> Self {
        Snapshot::Breweries(table.values().map(BreweryRecord::from).collect())
    }

    pub fn beers(table: &Table<Beer>) -> Self {
        Snapshot::Beers(table.values().map(BeerRecord::from).collect())
    }

    pub fn users(table: &Table<User>) -> Self {
        Snapshot::Users(table.values().map(UserRecord::from).collect())
    }

    pub fn reviews(table: &Table<Review>) -> Self {
        Snapshot::Reviews(table.values().map(ReviewRecord::from).collect())
    }

    /// Which table this snapshot belongs to
    pub fn kind(&self) -> EntityKind {
        match self {
            Snapshot::Breweries(_) => EntityKind::Brewery,
            Snapshot::Beers(_) => EntityKind::Beer,
            Snapshot::Users(_) => EntityKind::User,
            Snapshot::Reviews(_) => EntityKind::Review,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Snapshot::Breweries(rows) => rows.len(),
            Snapshot::Beers(rows) => rows.len(),
            Snapshot::Users(rows) => rows.len(),
            Snapshot::Reviews(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
