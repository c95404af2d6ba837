//! Client side of the Scrumblr board: keeps the in-memory task list in step with the
//! remote task store and turns board interactions into store requests.
pub mod config;
pub mod connectors;
pub mod controller;
pub mod sync;
pub mod view;
