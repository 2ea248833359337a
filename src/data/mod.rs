//! Static portfolio content.

pub mod skills;
