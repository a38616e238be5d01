pub mod error;
pub mod frontend;

pub use error::SheetError;
pub use frontend::parse;
