//! Command implementations.

pub mod days;
pub mod favorites;
pub mod fetch;
pub mod next;
pub mod show;
pub mod status;
pub mod use_day;
pub mod util;
