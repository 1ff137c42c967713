use serde::{Deserialize, Serialize};

use super::error::StoryError;

/// The reference story: every line in its one correct word order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Story {
    pub meta: StoryMeta,
    pub lines: Vec<StoryLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoryMeta {
    pub title: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoryLine {
    pub words: Vec<String>,
}

impl Story {
    pub fn new<L, W>(title: impl Into<String>, lines: L) -> Self
    where
        L: IntoIterator<Item = W>,
        W: IntoIterator,
        W::Item: Into<String>,
    {
        Story {
            meta: StoryMeta {
                title: title.into(),
                language: None,
            },
            lines: lines
                .into_iter()
                .map(|words| StoryLine {
                    words: words.into_iter().map(Into::into).collect(),
                })
                .collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, line: usize) -> Option<&[String]> {
        self.lines.get(line).map(|l| l.words.as_slice())
    }

    pub fn word(&self, line: usize, position: usize) -> Option<&str> {
        self.line(line)
            .and_then(|words| words.get(position))
            .map(String::as_str)
    }

    pub fn validate(&self) -> Result<(), StoryError> {
        if self.lines.is_empty() {
            return Err(StoryError::Empty);
        }
        for (line, story_line) in self.lines.iter().enumerate() {
            if story_line.words.is_empty() {
                return Err(StoryError::EmptyLine { line: line + 1 });
            }
            if let Some(position) = story_line.words.iter().position(|w| w.trim().is_empty()) {
                return Err(StoryError::BlankWord {
                    line: line + 1,
                    position: position + 1,
                });
            }
        }
        Ok(())
    }
}
