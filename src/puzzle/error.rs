use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("failed to read story file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse story TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("story has no lines")]
    Empty,
    #[error("line {line} has no words")]
    EmptyLine { line: usize },
    #[error("line {line} has a blank word at position {position}")]
    BlankWord { line: usize, position: usize },
}
