pub mod loader;
pub mod schema;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::{
    AuthorMarker, FixtureConfig, FramesConfig, PageTermination, PaginationConfig, QuillConfig,
    TablefulTermination, TimeoutConfig,
};
