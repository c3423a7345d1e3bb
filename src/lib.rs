pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod theme;
pub mod view;

pub use error::FixtureError;
