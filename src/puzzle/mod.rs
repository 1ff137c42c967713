pub mod error;
pub mod loader;
pub mod types;

pub use error::StoryError;
pub use loader::{default_story, load_story, parse_story};
pub use types::{Story, StoryLine, StoryMeta};
