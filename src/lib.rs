//! Library crate root re-exporting the host, resolver, and launcher modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod host;
pub mod launcher;
pub mod resolver;
