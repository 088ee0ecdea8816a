//! Views rendered at the edges of the crate: HTTP bodies and quiz display text.

pub mod health;
pub mod quiz;
