//! liita: terminal query interface for the LiITA knowledge base.
//!
//! The binary starts the TUI by default; the subcommands in [`cli`] run a
//! single query headlessly through [`headless`].

pub mod cli;
pub mod headless;
