//! Entity Store - In-memory tables for the brewery graph
//!
//! Each table is an insertion-ordered map behind its own `RwLock`, so readers
//! of one table never wait on writers of another. Operations that touch more
//! than one table take the write locks they need in a fixed order
//! (breweries → beers → users → reviews) and hold them until the entity and
//! all of its back-references are in place.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{push_unique, remove_id, Beer, Brewery, EntityKind, Review, User};
use crate::{Error, Result};

/// One table: id → entity, in insertion order
pub type Table<T> = IndexMap<String, T>;

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn insert_into<T>(table: &mut Table<T>, kind: EntityKind, id: &str, value: T) -> Result<()> {
    if table.contains_key(id) {
        return Err(Error::DuplicateId {
            kind,
            id: id.to_string(),
        });
    }
    table.insert(id.to_string(), value);
    Ok(())
}

fn reference<'t, T>(table: &'t mut Table<T>, kind: EntityKind, id: &str) -> Result<&'t mut T> {
    table.get_mut(id).ok_or_else(|| Error::ReferenceNotFound {
        kind,
        id: id.to_string(),
    })
}

fn occurrences(list: &[String], id: &str) -> usize {
    list.iter().filter(|x| x.as_str() == id).count()
}

/// In-memory store owning the four entity tables.
///
/// Construct once at startup and share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct EntityStore {
    breweries: RwLock<Table<Brewery>>,
    beers: RwLock<Table<Beer>>,
    users: RwLock<Table<User>>,
    reviews: RwLock<Table<Review>>,
}

impl EntityStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Reads ==========

    pub fn get_brewery(&self, id: &str) -> Option<Brewery> {
        read(&self.breweries).get(id).cloned()
    }

    pub fn get_beer(&self, id: &str) -> Option<Beer> {
        read(&self.beers).get(id).cloned()
    }

    pub fn get_user(&self, id: &str) -> Option<User> {
        read(&self.users).get(id).cloned()
    }

    pub fn get_review(&self, id: &str) -> Option<Review> {
        read(&self.reviews).get(id).cloned()
    }

    pub fn list_breweries(&self) -> Vec<Brewery> {
        read(&self.breweries).values().cloned().collect()
    }

    pub fn list_beers(&self) -> Vec<Beer> {
        read(&self.beers).values().cloned().collect()
    }

    pub fn list_users(&self) -> Vec<User> {
        read(&self.users).values().cloned().collect()
    }

    pub fn list_reviews(&self) -> Vec<Review> {
        read(&self.reviews).values().cloned().collect()
    }

    /// Look up several beers at once, skipping ids that are not present
    pub fn beers_by_ids(&self, ids: &[String]) -> Vec<Beer> {
        let beers = read(&self.beers);
        ids.iter().filter_map(|id| beers.get(id).cloned()).collect()
    }

    /// Look up several reviews at once, skipping ids that are not present
    pub fn reviews_by_ids(&self, ids: &[String]) -> Vec<Review> {
        let reviews = read(&self.reviews);
        ids.iter().filter_map(|id| reviews.get(id).cloned()).collect()
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        match kind {
            EntityKind::Brewery => read(&self.breweries).contains_key(id),
            EntityKind::Beer => read(&self.beers).contains_key(id),
            EntityKind::User => read(&self.users).contains_key(id),
            EntityKind::Review => read(&self.reviews).contains_key(id),
        }
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Brewery => read(&self.breweries).len(),
            EntityKind::Beer => read(&self.beers).len(),
            EntityKind::User => read(&self.users).len(),
            EntityKind::Review => read(&self.reviews).len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        EntityKind::all().iter().all(|kind| self.len(*kind) == 0)
    }

    /// Get table sizes
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            breweries: self.len(EntityKind::Brewery),
            beers: self.len(EntityKind::Beer),
            users: self.len(EntityKind::User),
            reviews: self.len(EntityKind::Review),
        }
    }

    // ========== Strict inserts and links ==========

    /// Insert a brewery; fails with `DuplicateId` if the id is taken
    pub fn insert_brewery(&self, brewery: Brewery) -> Result<()> {
        let id = brewery.id.clone();
        insert_into(&mut *write(&self.breweries), EntityKind::Brewery, &id, brewery)
    }

    /// Insert a beer without linking it; see `link_beer_to_brewery`
    pub fn insert_beer(&self, beer: Beer) -> Result<()> {
        let id = beer.id.clone();
        insert_into(&mut *write(&self.beers), EntityKind::Beer, &id, beer)
    }

    pub fn insert_user(&self, user: User) -> Result<()> {
        let id = user.id.clone();
        insert_into(&mut *write(&self.users), EntityKind::User, &id, user)
    }

    /// Insert a review without linking it; see `link_review_to_beer_and_user`
    pub fn insert_review(&self, review: Review) -> Result<()> {
        let id = review.id.clone();
        insert_into(&mut *write(&self.reviews), EntityKind::Review, &id, review)
    }

    /// Append a beer to its brewery's beer list.
    ///
    /// A beer already linked elsewhere is moved off its previous brewery.
    pub fn link_beer_to_brewery(&self, beer_id: &str, brewery_id: &str) -> Result<()> {
        let mut breweries = write(&self.breweries);
        let mut beers = write(&self.beers);
        reference(&mut *breweries, EntityKind::Brewery, brewery_id)?;
        let beer = reference(&mut *beers, EntityKind::Beer, beer_id)?;

        if let Some(previous) = beer.brewery_id.as_deref().filter(|old| *old != brewery_id) {
            if let Some(old) = breweries.get_mut(previous) {
                remove_id(&mut old.beer_ids, beer_id);
            }
        }
        beer.brewery_id = Some(brewery_id.to_string());

        let brewery = reference(&mut *breweries, EntityKind::Brewery, brewery_id)?;
        push_unique(&mut brewery.beer_ids, beer_id);
        Ok(())
    }

    /// Append a review to both its beer's and its user's review lists
    pub fn link_review_to_beer_and_user(&self, review_id: &str) -> Result<()> {
        let mut beers = write(&self.beers);
        let mut users = write(&self.users);
        let reviews = read(&self.reviews);
        let review = reviews.get(review_id).ok_or_else(|| Error::ReferenceNotFound {
            kind: EntityKind::Review,
            id: review_id.to_string(),
        })?;

        let beer = reference(&mut *beers, EntityKind::Beer, &review.beer_id)?;
        let user = reference(&mut *users, EntityKind::User, &review.user_id)?;
        push_unique(&mut beer.review_ids, review_id);
        push_unique(&mut user.review_ids, review_id);
        Ok(())
    }

    // ========== Transactional creation ==========

    /// Insert a beer and link it into its brewery as one critical section.
    ///
    /// `on_commit` runs with the beer table still locked. If it fails, the beer
    /// and its back-link are removed again and the error is returned.
    pub fn create_beer<F>(&self, beer: Beer, on_commit: F) -> Result<Beer>
    where
        F: FnOnce(&Table<Beer>) -> Result<()>,
    {
        let brewery_id = beer.brewery_id.clone().ok_or_else(|| {
            Error::InvalidArgument("a new beer needs a brewery".to_string())
        })?;

        let mut breweries = write(&self.breweries);
        let mut beers = write(&self.beers);
        let brewery = reference(&mut *breweries, EntityKind::Brewery, &brewery_id)?;

        let id = beer.id.clone();
        insert_into(&mut *beers, EntityKind::Beer, &id, beer.clone())?;
        push_unique(&mut brewery.beer_ids, &id);

        if let Err(e) = on_commit(&*beers) {
            beers.shift_remove(&id);
            remove_id(&mut brewery.beer_ids, &id);
            return Err(e);
        }
        Ok(beer)
    }

    /// Insert a review and link it into its beer and user as one critical section.
    ///
    /// Rollback on a failed `on_commit` works as in `create_beer`.
    pub fn create_review<F>(&self, review: Review, on_commit: F) -> Result<Review>
    where
        F: FnOnce(&Table<Review>) -> Result<()>,
    {
        let mut beers = write(&self.beers);
        let mut users = write(&self.users);
        let mut reviews = write(&self.reviews);
        let beer = reference(&mut *beers, EntityKind::Beer, &review.beer_id)?;
        let user = reference(&mut *users, EntityKind::User, &review.user_id)?;

        let id = review.id.clone();
        insert_into(&mut *reviews, EntityKind::Review, &id, review.clone())?;
        push_unique(&mut beer.review_ids, &id);
        push_unique(&mut user.review_ids, &id);

        if let Err(e) = on_commit(&*reviews) {
            reviews.shift_remove(&id);
            remove_id(&mut beer.review_ids, &id);
            remove_id(&mut user.review_ids, &id);
            return Err(e);
        }
        Ok(review)
    }

    /// Insert a user; rollback on a failed `on_commit` as in `create_beer`
    pub fn create_user<F>(&self, user: User, on_commit: F) -> Result<User>
    where
        F: FnOnce(&Table<User>) -> Result<()>,
    {
        let mut users = write(&self.users);

        let id = user.id.clone();
        insert_into(&mut *users, EntityKind::User, &id, user.clone())?;

        if let Err(e) = on_commit(&*users) {
            users.shift_remove(&id);
            return Err(e);
        }
        Ok(user)
    }

    // ========== Bulk load (last write wins) ==========

    /// Insert or overwrite a brewery, keeping the beer list it already had
    pub fn upsert_brewery(&self, mut brewery: Brewery) {
        let mut breweries = write(&self.breweries);
        if let Some(existing) = breweries.get(&brewery.id) {
            brewery.beer_ids = existing.beer_ids.clone();
        }
        breweries.insert(brewery.id.clone(), brewery);
    }

    /// Insert or overwrite a beer.
    ///
    /// A brewery id that is not in the store is dropped and the beer is kept
    /// without a brewery. Returns whether the beer ended up linked.
    pub fn upsert_beer(&self, mut beer: Beer) -> bool {
        let mut breweries = write(&self.breweries);
        let mut beers = write(&self.beers);

        if let Some(existing) = beers.get(&beer.id) {
            beer.review_ids = existing.review_ids.clone();
            if let Some(old) = existing.brewery_id.as_deref() {
                if beer.brewery_id.as_deref() != Some(old) {
                    if let Some(brewery) = breweries.get_mut(old) {
                        remove_id(&mut brewery.beer_ids, &beer.id);
                    }
                }
            }
        }

        let linked = match beer.brewery_id.as_deref() {
            Some(brewery_id) => match breweries.get_mut(brewery_id) {
                Some(brewery) => {
                    push_unique(&mut brewery.beer_ids, &beer.id);
                    true
                }
                None => false,
            },
            None => false,
        };
        if !linked {
            beer.brewery_id = None;
        }

        beers.insert(beer.id.clone(), beer);
        linked
    }

    /// Insert or overwrite a user, keeping the review list it already had
    pub fn upsert_user(&self, mut user: User) {
        let mut users = write(&self.users);
        if let Some(existing) = users.get(&user.id) {
            user.review_ids = existing.review_ids.clone();
        }
        users.insert(user.id.clone(), user);
    }

    /// Insert or overwrite a review.
    ///
    /// Returns `false`, leaving the store untouched, when the beer or the user
    /// is missing.
    pub fn upsert_review(&self, review: Review) -> bool {
        let mut beers = write(&self.beers);
        let mut users = write(&self.users);
        let mut reviews = write(&self.reviews);

        if !beers.contains_key(&review.beer_id) || !users.contains_key(&review.user_id) {
            return false;
        }

        if let Some(existing) = reviews.get(&review.id) {
            if existing.beer_id != review.beer_id {
                if let Some(beer) = beers.get_mut(&existing.beer_id) {
                    remove_id(&mut beer.review_ids, &review.id);
                }
            }
            if existing.user_id != review.user_id {
                if let Some(user) = users.get_mut(&existing.user_id) {
                    remove_id(&mut user.review_ids, &review.id);
                }
            }
        }

        if let Some(beer) = beers.get_mut(&review.beer_id) {
            push_unique(&mut beer.review_ids, &review.id);
        }
        if let Some(user) = users.get_mut(&review.user_id) {
            push_unique(&mut user.review_ids, &review.id);
        }
        reviews.insert(review.id.clone(), review);
        true
    }

    // ========== Integrity ==========

    /// Check every cross-table invariant and describe each violation found
    pub fn check_integrity(&self) -> Vec<String> {
        let breweries = read(&self.breweries);
        let beers = read(&self.beers);
        let users = read(&self.users);
        let reviews = read(&self.reviews);
        let mut problems = Vec::new();

        for beer in beers.values() {
            if let Some(brewery_id) = &beer.brewery_id {
                match breweries.get(brewery_id) {
                    None => problems.push(format!("beer {} points at missing brewery {}", beer.id, brewery_id)),
                    Some(brewery) => {
                        let n = occurrences(&brewery.beer_ids, &beer.id);
                        if n != 1 {
                            problems.push(format!("beer {} listed {} times by brewery {}", beer.id, n, brewery_id));
                        }
                    }
                }
            }
            for review_id in &beer.review_ids {
                match reviews.get(review_id) {
                    Some(review) if review.beer_id == beer.id => {}
                    _ => problems.push(format!("beer {} lists stray review {}", beer.id, review_id)),
                }
            }
        }

        for brewery in breweries.values() {
            for beer_id in &brewery.beer_ids {
                match beers.get(beer_id) {
                    Some(beer) if beer.brewery_id.as_deref() == Some(brewery.id.as_str()) => {}
                    _ => problems.push(format!("brewery {} lists stray beer {}", brewery.id, beer_id)),
                }
            }
        }

        for user in users.values() {
            for review_id in &user.review_ids {
                match reviews.get(review_id) {
                    Some(review) if review.user_id == user.id => {}
                    _ => problems.push(format!("user {} lists stray review {}", user.id, review_id)),
                }
            }
        }

        for review in reviews.values() {
            match beers.get(&review.beer_id) {
                None => problems.push(format!("review {} points at missing beer {}", review.id, review.beer_id)),
                Some(beer) => {
                    let n = occurrences(&beer.review_ids, &review.id);
                    if n != 1 {
                        problems.push(format!("review {} listed {} times by beer {}", review.id, n, beer.id));
                    }
                }
            }
            match users.get(&review.user_id) {
                None => problems.push(format!("review {} points at missing user {}", review.id, review.user_id)),
                Some(user) => {
                    let n = occurrences(&user.review_ids, &review.id);
                    if n != 1 {
                        problems.push(format!("review {} listed {} times by user {}", review.id, n, user.id));
                    }
                }
            }
        }

        problems
    }
}

/// Table sizes of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub breweries: usize,
    pub beers: usize,
    pub users: usize,
    pub reviews: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        writeln!(f, "  Breweries: {}", self.breweries)?;
        writeln!(f, "  Beers: {}", self.beers)?;
        writeln!(f, "  Users: {}", self.users)?;
        writeln!(f, "  Reviews: {}", self.reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> EntityStore {
        let store = EntityStore::new();
        store.insert_brewery(Brewery::new("1", "Guinness", "Ireland")).unwrap();
        store.insert_user(User::new("u1", "Ann", "ann@x.io")).unwrap();
        store
            .create_beer(Beer::new("b1", "Stout", "Dry Stout", Some("1".into())), |_| Ok(()))
            .unwrap();
        store
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let store = EntityStore::new();
        store.insert_user(User::new("u1", "Ann", "ann@x.io")).unwrap();

        let err = store.insert_user(User::new("u1", "Bob", "bob@x.io")).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { kind: EntityKind::User, .. }));
        assert_eq!(store.get_user("u1").unwrap().name, "Ann");
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let store = EntityStore::new();
        for id in ["c", "a", "b"] {
            store.insert_brewery(Brewery::new(id, id, "X")).unwrap();
        }
        let ids: Vec<_> = store.list_breweries().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_get_miss_is_none() {
        let store = seeded();
        assert!(store.get_beer("nope").is_none());
        assert!(store.get_brewery("nope").is_none());
        assert!(!store.contains(EntityKind::Review, "nope"));
    }

    #[test]
    fn test_insert_then_link() {
        let store = seeded();
        store.insert_beer(Beer::new("b2", "Lager", "Pale", None)).unwrap();
        store.link_beer_to_brewery("b2", "1").unwrap();

        store.insert_review(Review::new("r1", "Nice", 4, "b2", "u1")).unwrap();
        store.link_review_to_beer_and_user("r1").unwrap();

        assert_eq!(store.get_brewery("1").unwrap().beer_ids, vec!["b1", "b2"]);
        assert_eq!(store.get_beer("b2").unwrap().review_ids, vec!["r1"]);
        assert_eq!(store.get_user("u1").unwrap().review_ids, vec!["r1"]);
        assert!(store.check_integrity().is_empty());
    }

    #[test]
    fn test_relink_moves_beer_between_breweries() {
        let store = seeded();
        store.insert_brewery(Brewery::new("2", "Heineken", "NL")).unwrap();
        store.insert_beer(Beer::new("b2", "Lager", "Pale", None)).unwrap();

        store.link_beer_to_brewery("b2", "1").unwrap();
        store.link_beer_to_brewery("b2", "2").unwrap();
        store.link_beer_to_brewery("b2", "2").unwrap();

        assert_eq!(store.get_brewery("1").unwrap().beer_ids, vec!["b1"]);
        assert_eq!(store.get_brewery("2").unwrap().beer_ids, vec!["b2"]);
        assert_eq!(store.get_beer("b2").unwrap().brewery_id.as_deref(), Some("2"));
        assert!(store.check_integrity().is_empty());
    }

    #[test]
    fn test_link_to_missing_brewery_changes_nothing() {
        let store = seeded();
        let err = store.link_beer_to_brewery("b1", "missing").unwrap_err();

        assert!(matches!(err, Error::ReferenceNotFound { kind: EntityKind::Brewery, .. }));
        assert_eq!(store.get_beer("b1").unwrap().brewery_id.as_deref(), Some("1"));
        assert!(store.check_integrity().is_empty());
    }

    #[test]
    fn test_readers_never_see_unlinked_new_rows() {
        let store = seeded();

        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..500 {
                    let beer = Beer::new(format!("new-{}", i), "IPA", "Ale", Some("1".to_string()));
                    store.create_beer(beer, |_| Ok(())).unwrap();
                    let review = Review::new(format!("r-{}", i), "ok", 3, "b1", "u1");
                    store.create_review(review, |_| Ok(())).unwrap();
                }
            });

            s.spawn(|| {
                for _ in 0..500 {
                    // Back-link lists only grow here, so a later read must contain every earlier row
                    let beers = store.list_beers();
                    let reviews = store.list_reviews();
                    let brewery = store.get_brewery("1").unwrap();
                    let beer = store.get_beer("b1").unwrap();
                    let user = store.get_user("u1").unwrap();

                    for listed in &beers {
                        assert!(brewery.beer_ids.contains(&listed.id), "beer {} not linked", listed.id);
                    }
                    for listed in &reviews {
                        assert!(beer.review_ids.contains(&listed.id), "review {} not on beer", listed.id);
                        assert!(user.review_ids.contains(&listed.id), "review {} not on user", listed.id);
                    }
                }
            });
        });

        assert_eq!(store.len(EntityKind::Beer), 501);
        assert_eq!(store.len(EntityKind::Review), 500);
        assert!(store.check_integrity().is_empty());
    }

    #[test]
    fn test_create_beer_links_brewery() {
        let store = seeded();
        let brewery = store.get_brewery("1").unwrap();
        assert_eq!(brewery.beer_ids, vec!["b1"]);
        assert!(store.check_integrity().is_empty());
    }

    #[test]
    fn test_create_beer_missing_brewery() {
        let store = seeded();
        let err = store
            .create_beer(Beer::new("b2", "IPA", "Ale", Some("999".into())), |_| Ok(()))
            .unwrap_err();
        assert!(matches!(err, Error::ReferenceNotFound { kind: EntityKind::Brewery, .. }));
        assert_eq!(store.len(EntityKind::Beer), 1);
    }

    #[test]
    fn test_failed_commit_rolls_back() {
        let store = seeded();
        let fail = |_: &Table<Review>| {
            Err(Error::PersistenceFailure {
                kind: EntityKind::Review,
                reason: "disk full".into(),
            })
        };

        let err = store
            .create_review(Review::new("r1", "Great!", 5, "b1", "u1"), fail)
            .unwrap_err();
        assert!(matches!(err, Error::PersistenceFailure { .. }));
        assert_eq!(store.len(EntityKind::Review), 0);
        assert!(store.get_beer("b1").unwrap().review_ids.is_empty());
        assert!(store.get_user("u1").unwrap().review_ids.is_empty());
    }

    #[test]
    fn test_commit_hook_sees_new_row() {
        let store = seeded();
        let mut seen = 0;
        store
            .create_user(User::new("u2", "Bob", "bob@x.io"), |users| {
                seen = users.len();
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_upsert_brewery_keeps_beer_list() {
        let store = seeded();
        store.upsert_brewery(Brewery::new("1", "Guinness & Co", "IE"));

        let brewery = store.get_brewery("1").unwrap();
        assert_eq!(brewery.name, "Guinness & Co");
        assert_eq!(brewery.beer_ids, vec!["b1"]);
        assert_eq!(store.len(EntityKind::Brewery), 1);
    }

    #[test]
    fn test_upsert_beer_moves_between_breweries() {
        let store = seeded();
        store.insert_brewery(Brewery::new("2", "Heineken", "NL")).unwrap();

        assert!(store.upsert_beer(Beer::new("b1", "Stout", "Dry Stout", Some("2".into()))));
        assert!(store.get_brewery("1").unwrap().beer_ids.is_empty());
        assert_eq!(store.get_brewery("2").unwrap().beer_ids, vec!["b1"]);
        assert!(store.check_integrity().is_empty());
    }

    #[test]
    fn test_upsert_beer_with_dangling_brewery() {
        let store = seeded();
        assert!(!store.upsert_beer(Beer::new("b9", "Ghost", "Sour", Some("missing".into()))));

        let beer = store.get_beer("b9").unwrap();
        assert_eq!(beer.brewery_id, None);
        assert!(store.check_integrity().is_empty());
    }

    #[test]
    fn test_upsert_review_skips_dangling() {
        let store = seeded();
        assert!(!store.upsert_review(Review::new("r1", "?", 3, "b1", "ghost")));
        assert!(!store.upsert_review(Review::new("r2", "?", 3, "ghost", "u1")));
        assert_eq!(store.len(EntityKind::Review), 0);

        assert!(store.upsert_review(Review::new("r3", "ok", 3, "b1", "u1")));
        assert!(store.upsert_review(Review::new("r3", "better", 4, "b1", "u1")));
        assert_eq!(store.get_beer("b1").unwrap().review_ids, vec!["r3"]);
        assert_eq!(store.get_review("r3").unwrap().rating, 4);
        assert!(store.check_integrity().is_empty());
    }

    #[test]
    fn test_stats() {
        let store = seeded();
        let stats = store.stats();
        assert_eq!(stats.breweries, 1);
        assert_eq!(stats.beers, 1);
        assert_eq!(stats.users, 1);
        assert_eq!(stats.reviews, 0);
        assert!(stats.to_string().contains("Beers: 1"));
        assert!(!store.is_empty());
        assert!(EntityStore::new().is_empty());
    }
}
