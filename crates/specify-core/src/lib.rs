pub mod agent;
pub mod config;
pub mod document;
pub mod error;
pub mod feature;
pub mod io;
pub mod paths;
pub mod plan;
pub mod prereq;
pub mod repo;
pub mod templates;
pub mod vcs;

pub use error::{Result, SpecifyError};
