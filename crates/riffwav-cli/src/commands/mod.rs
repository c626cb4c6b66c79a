//! CLI command implementations

pub mod blank;
pub mod fix;
pub mod header;
pub mod inspect;
