//! The wildfire event table and its climate join.

pub mod error;
pub mod join;
pub mod table;
