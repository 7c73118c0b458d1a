//! Library side of the `toolbox` command-line host.

pub mod commands;
pub mod logging;
pub mod render;
