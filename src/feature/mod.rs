//! The features of the application, each with its own API, service and repository.

pub mod item;
