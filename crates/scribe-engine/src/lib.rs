pub mod cli;
pub mod codegen;
pub mod config;
pub mod dom;
pub mod recorder;
pub mod selector;
pub mod session;
pub mod store;

pub use scribe_common::formatter;
pub use scribe_common::protocol;
