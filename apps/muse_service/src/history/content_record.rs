use serde::{Deserialize, Serialize};

use crate::prompts::content_prompt::PromptOptions;

/// A generated piece of content that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentDraft {
    pub keyword: String,
    pub content_type: String,
    pub language: String,
    pub tone: String,
    pub audience: String,
    pub rhyme_scheme: String,
    pub length_words: u32,
    pub tags: String,
    pub output: String,
}

impl ContentDraft {
    pub fn new(options: PromptOptions, tags: String, output: String) -> Self {
        Self {
            keyword: options.keyword,
            content_type: options.content_type,
            language: options.language,
            tone: options.tone,
            audience: options.audience,
            rhyme_scheme: options.rhyme_scheme,
            length_words: options.length_words,
            tags,
            output,
        }
    }

    /// The generation options, for regenerating with the same settings.
    pub fn options(&self) -> PromptOptions {
        PromptOptions {
            keyword: self.keyword.clone(),
            content_type: self.content_type.clone(),
            language: self.language.clone(),
            tone: self.tone.clone(),
            audience: self.audience.clone(),
            rhyme_scheme: self.rhyme_scheme.clone(),
            length_words: self.length_words,
        }
    }
}

/// One saved entry of the history file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(flatten)]
    pub draft: ContentDraft,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub favorite: bool,
}

impl ContentRecord {
    /// Case-insensitive substring match over keyword, output and tags.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        [&self.draft.keyword, &self.draft.output, &self.draft.tags]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_reads_flat_json_with_missing_fields() {
        let record: ContentRecord = serde_json::from_str(
            r#"{"id": 3, "keyword": "Hope", "content_type": "Quote", "output": "Hold on."}"#,
        )
        .unwrap();

        assert_eq!(record.id, 3);
        assert_eq!(record.draft.keyword, "Hope");
        assert_eq!(record.draft.tags, "");
        assert!(!record.favorite);
    }

    #[test]
    fn record_writes_flat_json() {
        let record = ContentRecord {
            id: 1,
            draft: ContentDraft {
                keyword: "tea".to_string(),
                ..ContentDraft::default()
            },
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            favorite: true,
        };
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["keyword"], "tea");
        assert_eq!(value["favorite"], true);
        assert!(value.get("draft").is_none());
    }

    #[test]
    fn matches_ignores_case_across_fields() {
        let record = ContentRecord {
            draft: ContentDraft {
                keyword: "Sunrise".to_string(),
                output: "A new day".to_string(),
                tags: "Morning, LIGHT".to_string(),
                ..ContentDraft::default()
            },
            ..ContentRecord::default()
        };

        assert!(record.matches("sunrise"));
        assert!(record.matches("new day"));
        assert!(record.matches("light"));
        assert!(!record.matches("night"));
    }
}
