pub mod logging;
pub mod lsp;
pub mod schema;
