//! Road graph CLI library.
//!
//! Output formatting shared by the `roadgraph-cli` subcommands.

pub mod output;
