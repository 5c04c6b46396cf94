//! Named resolvers
//!
//! The surface an external query interpreter calls. Root fields:
//! - reads: `beers`, `beer(id)`, `breweries`, `brewery(id)`, `reviews`,
//!   `review(id)`, `users`, `user(id)`
//! - mutations: `addBeer(input)`, `addReview(input)`, `addUser(input)`
//!
//! Relationship fields (`Beer.brewery`, `Brewery.beers`, ...) are resolved
//! through the store from the ids each entity carries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Beer, Brewery, EntityKind, Review, User};
use crate::storage::{DurabilityPolicy, Persister, Snapshot};
use crate::store::EntityStore;
use crate::{Error, Result};

/// Arguments of `addBeer`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBeerInput {
    pub name: String,
    pub style: String,
    pub brewery_id: String,
}

/// Arguments of `addReview`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewInput {
    pub text: String,
    pub rating: i32,
    pub beer_id: String,
    pub user_id: String,
}

/// Arguments of `addUser`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddUserInput {
    pub name: String,
    pub email: String,
}

/// An entity returned by a resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Brewery(Brewery),
    Beer(Beer),
    User(User),
    Review(Review),
}

impl Node {
    /// Type name as the schema spells it
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Brewery(_) => "Brewery",
            Node::Beer(_) => "Beer",
            Node::User(_) => "User",
            Node::Review(_) => "Review",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Node::Brewery(b) => &b.id,
            Node::Beer(b) => &b.id,
            Node::User(u) => &u.id,
            Node::Review(r) => &r.id,
        }
    }

    /// Value of a scalar field, or `None` if `field` is not a scalar of this type
    pub fn scalar(&self, field: &str) -> Option<Value> {
        let value = match (self, field) {
            (_, "id") => Value::from(self.id()),
            (_, "__typename") => Value::from(self.type_name()),
            (Node::Brewery(b), "name") => Value::from(b.name.as_str()),
            (Node::Brewery(b), "country") => Value::from(b.country.as_str()),
            (Node::Beer(b), "name") => Value::from(b.name.as_str()),
            (Node::Beer(b), "style") => Value::from(b.style.as_str()),
            (Node::User(u), "name") => Value::from(u.name.as_str()),
            (Node::User(u), "email") => Value::from(u.email.as_str()),
            (Node::Review(r), "text") => Value::from(r.text.as_str()),
            (Node::Review(r), "rating") => Value::from(r.rating),
            _ => return None,
        };
        Some(value)
    }

    /// Names of the scalar fields of this type
    pub fn scalar_fields(&self) -> &'static [&'static str] {
        match self {
            Node::Brewery(_) => &["id", "name", "country"],
            Node::Beer(_) => &["id", "name", "style"],
            Node::User(_) => &["id", "name", "email"],
            Node::Review(_) => &["id", "text", "rating"],
        }
    }
}

/// Result of resolving one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Absent entity; the interpreter renders it as `null`
    Null,
    One(Node),
    Many(Vec<Node>),
}

impl Resolved {
    fn optional<T>(value: Option<T>, wrap: fn(T) -> Node) -> Self {
        value.map(|v| Resolved::One(wrap(v))).unwrap_or(Resolved::Null)
    }

    fn many<T>(values: Vec<T>, wrap: fn(T) -> Node) -> Self {
        Resolved::Many(values.into_iter().map(wrap).collect())
    }
}

fn id_arg(field: &str, args: &Value) -> Result<String> {
    match args.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(Error::InvalidArgument(format!("{} requires an 'id' argument", field))),
    }
}

fn input_arg<T: serde::de::DeserializeOwned>(field: &str, args: &Value) -> Result<T> {
    let input = args
        .get("input")
        .ok_or_else(|| Error::InvalidArgument(format!("{} requires an 'input' argument", field)))?;
    serde_json::from_value(input.clone())
        .map_err(|e| Error::InvalidArgument(format!("{}: {}", field, e)))
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Resolver set bound to one store and one persister
#[derive(Clone)]
pub struct Resolvers {
    store: Arc<EntityStore>,
    persister: Arc<dyn Persister>,
    policy: DurabilityPolicy,
}

impl Resolvers {
    pub fn new(store: Arc<EntityStore>, persister: Arc<dyn Persister>) -> Self {
        Self {
            store,
            persister,
            policy: DurabilityPolicy::default(),
        }
    }

    /// Set what mutations do when persistence fails
    pub fn with_policy(mut self, policy: DurabilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn policy(&self) -> DurabilityPolicy {
        self.policy
    }

    // ========== Reads ==========

    pub fn beers(&self) -> Vec<Beer> {
        self.store.list_beers()
    }

    pub fn beer(&self, id: &str) -> Option<Beer> {
        self.store.get_beer(id)
    }

    pub fn breweries(&self) -> Vec<Brewery> {
        self.store.list_breweries()
    }

    pub fn brewery(&self, id: &str) -> Option<Brewery> {
        self.store.get_brewery(id)
    }

    pub fn reviews(&self) -> Vec<Review> {
        self.store.list_reviews()
    }

    pub fn review(&self, id: &str) -> Option<Review> {
        self.store.get_review(id)
    }

    pub fn users(&self) -> Vec<User> {
        self.store.list_users()
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.store.get_user(id)
    }

    /// Single lookup by kind; a miss is reported as `NotFound`
    pub fn lookup(&self, kind: EntityKind, id: &str) -> Result<Node> {
        let node = match kind {
            EntityKind::Brewery => self.brewery(id).map(Node::Brewery),
            EntityKind::Beer => self.beer(id).map(Node::Beer),
            EntityKind::User => self.user(id).map(Node::User),
            EntityKind::Review => self.review(id).map(Node::Review),
        };
        node.ok_or_else(|| Error::NotFound {
            kind,
            id: id.to_string(),
        })
    }

    // ========== Relationships ==========

    pub fn beer_brewery(&self, beer: &Beer) -> Option<Brewery> {
        beer.brewery_id.as_deref().and_then(|id| self.store.get_brewery(id))
    }

    pub fn beer_reviews(&self, beer: &Beer) -> Vec<Review> {
        self.store.reviews_by_ids(&beer.review_ids)
    }

    pub fn brewery_beers(&self, brewery: &Brewery) -> Vec<Beer> {
        self.store.beers_by_ids(&brewery.beer_ids)
    }

    pub fn review_beer(&self, review: &Review) -> Option<Beer> {
        self.store.get_beer(&review.beer_id)
    }

    pub fn review_user(&self, review: &Review) -> Option<User> {
        self.store.get_user(&review.user_id)
    }

    pub fn user_reviews(&self, user: &User) -> Vec<Review> {
        self.store.reviews_by_ids(&user.review_ids)
    }

    // ========== Mutations ==========

    /// Create a beer under an existing brewery and persist the beer table
    pub fn add_beer(&self, input: AddBeerInput) -> Result<Beer> {
        let beer = Beer::new(new_id(), input.name, input.style, Some(input.brewery_id));
        let (policy, persister) = (self.policy, self.persister.as_ref());

        let result = self
            .store
            .create_beer(beer, |table| policy.commit(persister, &Snapshot::beers(table)));
        match &result {
            Ok(beer) => tracing::info!(id = %beer.id, brewery = ?beer.brewery_id, "Beer added"),
            Err(e) => tracing::warn!(error = %e, "addBeer failed"),
        }
        result
    }

    /// Create a review of an existing beer by an existing user and persist the review table
    pub fn add_review(&self, input: AddReviewInput) -> Result<Review> {
        let review = Review::new(new_id(), input.text, input.rating, input.beer_id, input.user_id);
        let (policy, persister) = (self.policy, self.persister.as_ref());

        let result = self
            .store
            .create_review(review, |table| policy.commit(persister, &Snapshot::reviews(table)));
        match &result {
            Ok(review) => tracing::info!(id = %review.id, beer = %review.beer_id, user = %review.user_id, "Review added"),
            Err(e) => tracing::warn!(error = %e, "addReview failed"),
        }
        result
    }

    /// Create a user and persist the user table
    pub fn add_user(&self, input: AddUserInput) -> Result<User> {
        let user = User::new(new_id(), input.name, input.email);
        let (policy, persister) = (self.policy, self.persister.as_ref());

        let result = self
            .store
            .create_user(user, |table| policy.commit(persister, &Snapshot::users(table)));
        match &result {
            Ok(user) => tracing::info!(id = %user.id, "User added"),
            Err(e) => tracing::warn!(error = %e, "addUser failed"),
        }
        result
    }

    // ========== Dispatch by name ==========

    /// Resolve a root field by name with its argument map
    pub fn resolve(&self, field: &str, args: &Value) -> Result<Resolved> {
        let resolved = match field {
            "beers" => Resolved::many(self.beers(), Node::Beer),
            "beer" => Resolved::optional(self.beer(&id_arg(field, args)?), Node::Beer),
            "breweries" => Resolved::many(self.breweries(), Node::Brewery),
            "brewery" => Resolved::optional(self.brewery(&id_arg(field, args)?), Node::Brewery),
            "reviews" => Resolved::many(self.reviews(), Node::Review),
            "review" => Resolved::optional(self.review(&id_arg(field, args)?), Node::Review),
            "users" => Resolved::many(self.users(), Node::User),
            "user" => Resolved::optional(self.user(&id_arg(field, args)?), Node::User),
            "addBeer" => Resolved::One(Node::Beer(self.add_beer(input_arg(field, args)?)?)),
            "addReview" => Resolved::One(Node::Review(self.add_review(input_arg(field, args)?)?)),
            "addUser" => Resolved::One(Node::User(self.add_user(input_arg(field, args)?)?)),
            _ => return Err(Error::InvalidArgument(format!("Unknown root field: {}", field))),
        };
        Ok(resolved)
    }

    /// Resolve a relationship field of `parent` by name
    pub fn resolve_field(&self, parent: &Node, field: &str) -> Result<Resolved> {
        let resolved = match (parent, field) {
            (Node::Beer(beer), "brewery") => Resolved::optional(self.beer_brewery(beer), Node::Brewery),
            (Node::Beer(beer), "reviews") => Resolved::many(self.beer_reviews(beer), Node::Review),
            (Node::Brewery(brewery), "beers") => Resolved::many(self.brewery_beers(brewery), Node::Beer),
            (Node::Review(review), "beer") => Resolved::optional(self.review_beer(review), Node::Beer),
            (Node::Review(review), "user") => Resolved::optional(self.review_user(review), Node::User),
            (Node::User(user), "reviews") => Resolved::many(self.user_reviews(user), Node::Review),
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "Unknown field {} on {}",
                    field,
                    parent.type_name()
                )))
            }
        };
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load, Dataset};
    use crate::storage::MemoryPersister;
    use serde_json::json;

    fn setup() -> (Resolvers, Arc<MemoryPersister>) {
        let store = Arc::new(EntityStore::new());
        let dataset = Dataset::from_value(&json!({
            "breweries": [{ "id": "1", "name": "Guinness", "country": "Ireland" }],
            "beers": [{ "id": "1", "name": "Draught", "style": "Stout", "breweryId": "1" }],
            "users": [{ "id": "1", "name": "Ann", "email": "ann@x.io" }],
            "reviews": [{ "id": "1", "text": "Creamy", "rating": "5", "beerId": "1", "userId": "1" }]
        }))
        .unwrap();
        load(&store, &dataset).unwrap();

        let persister = Arc::new(MemoryPersister::new());
        (Resolvers::new(store, persister.clone()), persister)
    }

    #[test]
    fn test_add_user_then_read_back() {
        let (resolvers, persister) = setup();
        let user = resolvers
            .add_user(AddUserInput { name: "Ann".into(), email: "ann@x.io".into() })
            .unwrap();

        let read = resolvers.user(&user.id).unwrap();
        assert_eq!(read.name, "Ann");
        assert_eq!(read.email, "ann@x.io");
        assert_eq!(persister.writes(), vec![EntityKind::User]);
        assert_eq!(persister.snapshot(EntityKind::User).unwrap().len(), 2);
    }

    #[test]
    fn test_add_beer_missing_brewery() {
        let (resolvers, persister) = setup();
        let before = resolvers.beers().len();

        let err = resolvers
            .add_beer(AddBeerInput { name: "IPA".into(), style: "Ale".into(), brewery_id: "999".into() })
            .unwrap_err();

        assert!(matches!(err, Error::ReferenceNotFound { kind: EntityKind::Brewery, .. }));
        assert_eq!(resolvers.beers().len(), before);
        assert!(persister.writes().is_empty());
    }

    #[test]
    fn test_add_beer_links_brewery() {
        let (resolvers, persister) = setup();
        let beer = resolvers
            .add_beer(AddBeerInput { name: "IPA".into(), style: "Ale".into(), brewery_id: "1".into() })
            .unwrap();

        let brewery = resolvers.beer_brewery(&beer).unwrap();
        assert_eq!(brewery.id, "1");
        let beers = resolvers.brewery_beers(&brewery);
        assert_eq!(beers.iter().filter(|b| b.id == beer.id).count(), 1);
        assert_eq!(persister.writes(), vec![EntityKind::Beer]);
    }

    #[test]
    fn test_add_review_persists_only_reviews() {
        let (resolvers, persister) = setup();
        let review = resolvers
            .add_review(AddReviewInput {
                text: "Great!".into(),
                rating: 5,
                beer_id: "1".into(),
                user_id: "1".into(),
            })
            .unwrap();

        let beer = resolvers.beer("1").unwrap();
        let reviews = resolvers.beer_reviews(&beer);
        assert_eq!(reviews.iter().filter(|r| r.id == review.id).count(), 1);
        assert_eq!(resolvers.user_reviews(&resolvers.user("1").unwrap()).len(), 2);

        assert_eq!(persister.writes(), vec![EntityKind::Review]);
        assert!(persister.snapshot(EntityKind::Beer).is_none());
        assert!(resolvers.store().check_integrity().is_empty());
    }

    #[test]
    fn test_add_review_missing_user() {
        let (resolvers, _) = setup();
        let err = resolvers
            .add_review(AddReviewInput {
                text: "?".into(),
                rating: 1,
                beer_id: "1".into(),
                user_id: "nobody".into(),
            })
            .unwrap_err();
        assert!(matches!(err, Error::ReferenceNotFound { kind: EntityKind::User, .. }));
        assert_eq!(resolvers.reviews().len(), 1);
    }

    #[test]
    fn test_best_effort_keeps_mutation() {
        let (resolvers, persister) = setup();
        persister.set_failing(true);

        let user = resolvers
            .add_user(AddUserInput { name: "Bob".into(), email: "bob@x.io".into() })
            .unwrap();
        assert!(resolvers.user(&user.id).is_some());
    }

    #[test]
    fn test_strict_rolls_back_mutation() {
        let (resolvers, persister) = setup();
        let resolvers = resolvers.with_policy(DurabilityPolicy::Strict);
        persister.set_failing(true);

        let err = resolvers
            .add_review(AddReviewInput {
                text: "Lost".into(),
                rating: 2,
                beer_id: "1".into(),
                user_id: "1".into(),
            })
            .unwrap_err();

        assert!(matches!(err, Error::PersistenceFailure { kind: EntityKind::Review, .. }));
        assert_eq!(resolvers.reviews().len(), 1);
        assert_eq!(resolvers.beer("1").unwrap().review_ids, vec!["1"]);
        assert_eq!(resolvers.user("1").unwrap().review_ids, vec!["1"]);
    }

    #[test]
    fn test_resolve_by_name() {
        let (resolvers, _) = setup();

        assert!(matches!(resolvers.resolve("beers", &json!({})).unwrap(), Resolved::Many(v) if v.len() == 1));
        assert_eq!(resolvers.resolve("beer", &json!({ "id": "missing" })).unwrap(), Resolved::Null);
        assert!(matches!(resolvers.resolve("brewery", &json!({ "id": 1 })).unwrap(), Resolved::One(_)));
        assert!(resolvers.resolve("beer", &json!({})).is_err());
        assert!(resolvers.resolve("wines", &json!({})).is_err());

        let added = resolvers
            .resolve("addUser", &json!({ "input": { "name": "John Doe", "email": "john@example.com" } }))
            .unwrap();
        match added {
            Resolved::One(node) => assert_eq!(node.scalar("email"), Some(json!("john@example.com"))),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_resolve_field() {
        let (resolvers, _) = setup();
        let review = Node::Review(resolvers.review("1").unwrap());

        match resolvers.resolve_field(&review, "user").unwrap() {
            Resolved::One(Node::User(user)) => assert_eq!(user.name, "Ann"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(resolvers.resolve_field(&review, "brewery").is_err());
    }

    #[test]
    fn test_lookup_miss_is_not_found() {
        let (resolvers, _) = setup();
        assert_eq!(resolvers.lookup(EntityKind::Beer, "1").unwrap().id(), "1");
        assert!(resolvers.lookup(EntityKind::Beer, "2").unwrap_err().is_not_found());
    }
}
