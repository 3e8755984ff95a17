//! fuelpath CLI library.
//!
//! Output formatting shared by the `fuelpath-cli` subcommands.

pub mod output;
