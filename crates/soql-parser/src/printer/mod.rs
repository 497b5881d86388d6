//! Text output for parsed queries: canonical serialization and tree dumps.

mod dump;
mod serialize;


pub use dump::AstPrinter;
pub use serialize::serialize;
