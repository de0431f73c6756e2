pub mod error;
pub mod protocol;

pub use error::{DriverError, QuillError, Result};
pub use protocol::{ElementId, Endpoint, Locator, QuoteRecord};
