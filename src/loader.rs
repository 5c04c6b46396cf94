//! Bulk loader - populates the store from untyped rows
//!
//! Rows are applied in dependency order (breweries, beers, users, reviews).
//! Dangling references are tolerated differently per table:
//! - a beer whose brewery is missing (or whose `breweryId` is absent or null)
//!   is kept, without a brewery link
//! - a review whose beer or user is missing is dropped
//!
//! Every row is parsed before the store is touched, so a malformed row aborts
//! the load with `InvalidData` and leaves the store as it was.

use std::path::Path;

use serde_json::{Map, Value};

use crate::model::{Beer, Brewery, EntityKind, Review, User};
use crate::storage::json::table_path;
use crate::store::EntityStore;
use crate::{Error, Result};

/// One untyped input row
pub type Row = Map<String, Value>;

/// The four row sources of a bulk load
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub breweries: Vec<Row>,
    pub beers: Vec<Row>,
    pub users: Vec<Row>,
    pub reviews: Vec<Row>,
}

impl Dataset {
    /// Read `breweries.json`, `beers.json`, `users.json` and `reviews.json` from `dir`.
    ///
    /// A missing file is an empty table.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            breweries: read_rows(dir, EntityKind::Brewery)?,
            beers: read_rows(dir, EntityKind::Beer)?,
            users: read_rows(dir, EntityKind::User)?,
            reviews: read_rows(dir, EntityKind::Review)?,
        })
    }

    /// Build from a single JSON object with one array per table
    pub fn from_value(value: &Value) -> Result<Self> {
        let table = |kind: EntityKind| -> Result<Vec<Row>> {
            match value.get(kind.table_name()) {
                None | Some(Value::Null) => Ok(Vec::new()),
                Some(rows) => rows_from_value(rows, kind),
            }
        };
        Ok(Self {
            breweries: table(EntityKind::Brewery)?,
            beers: table(EntityKind::Beer)?,
            users: table(EntityKind::User)?,
            reviews: table(EntityKind::Review)?,
        })
    }
}

fn read_rows(dir: &Path, kind: EntityKind) -> Result<Vec<Row>> {
    let path = table_path(dir, kind);
    if !path.exists() {
        tracing::debug!("No {} file at {}, starting empty", kind.table_name(), path.display());
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(&path)?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| Error::InvalidData(format!("{}: {}", path.display(), e)))?;
    rows_from_value(&value, kind)
}

fn rows_from_value(value: &Value, kind: EntityKind) -> Result<Vec<Row>> {
    let items = value
        .as_array()
        .ok_or_else(|| Error::InvalidData(format!("{} must be an array of objects", kind.table_name())))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_object().cloned().ok_or_else(|| {
                Error::InvalidData(format!("{} row {} is not an object", kind.table_name(), index))
            })
        })
        .collect()
}

/// Outcome of a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub breweries: usize,
    pub beers: usize,
    pub users: usize,
    pub reviews: usize,
    /// Beers kept without a brewery because theirs was missing
    pub unlinked_beers: usize,
    /// Reviews dropped because their beer or user was missing
    pub skipped_reviews: usize,
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Load Summary:")?;
        writeln!(f, "  Breweries: {}", self.breweries)?;
        writeln!(f, "  Beers: {} ({} without brewery)", self.beers, self.unlinked_beers)?;
        writeln!(f, "  Users: {}", self.users)?;
        writeln!(f, "  Reviews: {} ({} skipped)", self.reviews, self.skipped_reviews)
    }
}

/// Scalar field as a string; numbers are stringified
fn scalar(row: &Row, key: &str, kind: EntityKind, index: usize) -> Result<Option<String>> {
    match row.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(Error::InvalidData(format!(
            "{} row {}: field '{}' must be a scalar, got {}",
            kind.table_name(),
            index,
            key,
            other
        ))),
    }
}

fn required(row: &Row, key: &str, kind: EntityKind, index: usize) -> Result<String> {
    scalar(row, key, kind, index)?.ok_or_else(|| {
        Error::InvalidData(format!("{} row {}: missing field '{}'", kind.table_name(), index, key))
    })
}

fn text(row: &Row, key: &str, kind: EntityKind, index: usize) -> Result<String> {
    Ok(scalar(row, key, kind, index)?.unwrap_or_default())
}

fn parse_brewery(row: &Row, index: usize) -> Result<Brewery> {
    let kind = EntityKind::Brewery;
    // Older seed files call the country "location"
    let country = match scalar(row, "country", kind, index)? {
        Some(country) => country,
        None => text(row, "location", kind, index)?,
    };
    Ok(Brewery::new(
        required(row, "id", kind, index)?,
        text(row, "name", kind, index)?,
        country,
    ))
}

fn parse_beer(row: &Row, index: usize) -> Result<Beer> {
    let kind = EntityKind::Beer;
    // Unlinked beers are written back with a null breweryId
    Ok(Beer::new(
        required(row, "id", kind, index)?,
        text(row, "name", kind, index)?,
        text(row, "style", kind, index)?,
        scalar(row, "breweryId", kind, index)?,
    ))
}

fn parse_user(row: &Row, index: usize) -> Result<User> {
    let kind = EntityKind::User;
    Ok(User::new(
        required(row, "id", kind, index)?,
        text(row, "name", kind, index)?,
        text(row, "email", kind, index)?,
    ))
}

fn parse_review(row: &Row, index: usize) -> Result<Review> {
    let kind = EntityKind::Review;
    let raw = required(row, "rating", kind, index)?;
    let rating: i32 = raw.trim().parse().map_err(|_| {
        Error::InvalidData(format!("reviews row {}: rating '{}' is not an integer", index, raw))
    })?;
    Ok(Review::new(
        required(row, "id", kind, index)?,
        text(row, "text", kind, index)?,
        rating,
        required(row, "beerId", kind, index)?,
        required(row, "userId", kind, index)?,
    ))
}

fn parse_all<T>(rows: &[Row], parse: fn(&Row, usize) -> Result<T>) -> Result<Vec<T>> {
    rows.iter().enumerate().map(|(index, row)| parse(row, index)).collect()
}

/// Populate `store` from `dataset`.
///
/// Ids already present are overwritten (last write wins).
pub fn load(store: &EntityStore, dataset: &Dataset) -> Result<LoadReport> {
    let breweries = parse_all(&dataset.breweries, parse_brewery)?;
    let beers = parse_all(&dataset.beers, parse_beer)?;
    let users = parse_all(&dataset.users, parse_user)?;
    let reviews = parse_all(&dataset.reviews, parse_review)?;

    let mut report = LoadReport::default();

    for brewery in breweries {
        store.upsert_brewery(brewery);
        report.breweries += 1;
    }

    for beer in beers {
        let id = beer.id.clone();
        let brewery_id = beer.brewery_id.clone();
        if !store.upsert_beer(beer) {
            match brewery_id {
                Some(brewery_id) => {
                    tracing::warn!(beer = %id, brewery = %brewery_id, "Brewery not found, beer kept without brewery")
                }
                None => tracing::debug!(beer = %id, "Beer has no brewery"),
            }
            report.unlinked_beers += 1;
        }
        report.beers += 1;
    }

    for user in users {
        store.upsert_user(user);
        report.users += 1;
    }

    for review in reviews {
        let id = review.id.clone();
        if store.upsert_review(review) {
            report.reviews += 1;
        } else {
            tracing::warn!(review = %id, "Beer or user not found, review skipped");
            report.skipped_reviews += 1;
        }
    }

    tracing::info!(
        breweries = report.breweries,
        beers = report.beers,
        users = report.users,
        reviews = report.reviews,
        skipped_reviews = report.skipped_reviews,
        "Data loaded"
    );
    Ok(report)
}

/// Read a data directory and load it into `store`
pub fn load_dir(store: &EntityStore, dir: &Path) -> Result<LoadReport> {
    let dataset = Dataset::from_dir(dir)?;
    load(store, &dataset)
}
