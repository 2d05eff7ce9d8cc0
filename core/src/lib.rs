//! Postle — guess who wrote today's forum posting.

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod posting;
pub mod roster;
pub mod sanitize;
pub mod selector;
pub mod store;
pub mod types;
pub mod view;
