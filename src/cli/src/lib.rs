//! dockerlayers CLI - explain the stages and layers of a Dockerfile.

pub mod commands;
pub mod output;
