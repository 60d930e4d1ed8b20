//! Library components for the MODS generator CLI.

pub mod logging;
pub mod pipeline;
