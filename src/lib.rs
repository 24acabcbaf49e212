// Crate root library declaration and module exports.
pub mod archive;
pub mod cli;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod matcher;
pub mod model;
pub mod profile;
pub mod range;
pub mod search;
pub mod selection;
pub mod storage;
pub mod timeline;
