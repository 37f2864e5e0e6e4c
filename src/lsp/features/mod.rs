//! LSP features offered by the RML server

pub mod completion;
