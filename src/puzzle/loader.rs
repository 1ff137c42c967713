use std::path::Path;

use super::error::StoryError;
use super::types::Story;

const DEFAULT_STORY: &str = include_str!("../../stories/lopburi_festival.toml");

pub fn load_story(path: &Path) -> Result<Story, StoryError> {
    let content = std::fs::read_to_string(path).map_err(|source| StoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_story(&content)
}

pub fn parse_story(content: &str) -> Result<Story, StoryError> {
    let story: Story = toml::from_str(content)?;
    story.validate()?;
    Ok(story)
}

/// The story bundled into the binary.
pub fn default_story() -> Result<Story, StoryError> {
    parse_story(DEFAULT_STORY)
}
