//! Application services for user identity.

mod resolver;

pub use resolver::{
    IdentityError, IdentityResolver, IdentityResult, RegisterUserRequest, Subject,
};
