pub mod resolver;
pub mod executor;

pub use resolver::{AddBeerInput, AddReviewInput, AddUserInput, Node, Resolved, Resolvers};
pub use executor::{Executor, FieldError, Response, Selection};
