// ABOUTME: Command module aggregator for the gantry CLI.
// ABOUTME: Re-exports deploy, containers, and ports command handlers.

mod connection;
mod containers;
mod deploy;
mod ports;

pub use containers::containers;
pub use deploy::deploy;
pub use ports::ports;
