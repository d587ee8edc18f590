pub mod domain;
pub use self::domain::{User, UserId};

pub(crate) mod repository;

pub(crate) mod routes;
