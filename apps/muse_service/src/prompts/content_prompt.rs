use serde::{Deserialize, Serialize};

pub const CONTENT_TYPES: [&str; 7] = [
    "Quote",
    "Poem",
    "Haiku",
    "Motivational Saying",
    "Social Media Caption",
    "Song Lyrics",
    "Story Beginning",
];
pub const LANGUAGES: [&str; 6] = ["English", "Hindi", "Marathi", "Spanish", "French", "German"];
pub const TONES: [&str; 5] = ["Inspirational", "Funny", "Serious", "Romantic", "Professional"];
pub const AUDIENCES: [&str; 4] = ["General", "Kids", "Adults", "Professionals"];
pub const RHYME_SCHEMES: [&str; 4] = ["Free Verse", "ABAB", "AABB", "ABCB"];

pub const DEFAULT_CONTENT_TYPE: &str = "Quote";
pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_TONE: &str = "Inspirational";
pub const DEFAULT_AUDIENCE: &str = "General";
pub const FREE_VERSE: &str = "Free Verse";

const MIN_LENGTH_WORDS: u32 = 4;
const MAX_LENGTH_WORDS: u32 = 150;

/// Everything the user picks on the generator form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptOptions {
    pub keyword: String,
    pub content_type: String,
    pub language: String,
    pub tone: String,
    pub audience: String,
    pub rhyme_scheme: String,
    pub length_words: u32,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            tone: DEFAULT_TONE.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            rhyme_scheme: FREE_VERSE.to_string(),
            length_words: default_length_words(DEFAULT_CONTENT_TYPE),
        }
    }
}

impl PromptOptions {
    /// Applies the form rules: trimmed keyword, blank selections fall back to
    /// defaults, rhyme scheme only for poems, and length fixed or clamped per
    /// content type.
    pub fn normalize(mut self) -> Self {
        fn or_default(value: String, default: &str) -> String {
            let value = value.trim();
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        }

        self.keyword = self.keyword.trim().to_string();
        self.content_type = or_default(self.content_type, DEFAULT_CONTENT_TYPE);
        self.language = or_default(self.language, DEFAULT_LANGUAGE);
        self.tone = or_default(self.tone, DEFAULT_TONE);
        self.audience = or_default(self.audience, DEFAULT_AUDIENCE);

        self.rhyme_scheme = if self.content_type == "Poem" {
            or_default(self.rhyme_scheme, FREE_VERSE)
        } else {
            FREE_VERSE.to_string()
        };

        self.length_words = match self.content_type.as_str() {
            "Haiku" | "Social Media Caption" => default_length_words(&self.content_type),
            _ => self.length_words.clamp(MIN_LENGTH_WORDS, MAX_LENGTH_WORDS),
        };

        self
    }
}

/// Target length the form starts from for each content type.
pub fn default_length_words(content_type: &str) -> u32 {
    match content_type {
        "Quote" => 12,
        "Haiku" => 17,
        "Social Media Caption" => 25,
        _ => 50,
    }
}

#[derive(Debug, Serialize)]
pub struct OptionCatalogue {
    pub content_types: Vec<&'static str>,
    pub languages: Vec<&'static str>,
    pub tones: Vec<&'static str>,
    pub audiences: Vec<&'static str>,
    pub rhyme_schemes: Vec<&'static str>,
    pub defaults: PromptOptions,
    pub min_length_words: u32,
    pub max_length_words: u32,
}

pub struct ContentPrompt;

impl ContentPrompt {
    pub fn catalogue() -> OptionCatalogue {
        OptionCatalogue {
            content_types: CONTENT_TYPES.to_vec(),
            languages: LANGUAGES.to_vec(),
            tones: TONES.to_vec(),
            audiences: AUDIENCES.to_vec(),
            rhyme_schemes: RHYME_SCHEMES.to_vec(),
            defaults: PromptOptions::default(),
            min_length_words: MIN_LENGTH_WORDS,
            max_length_words: MAX_LENGTH_WORDS,
        }
    }

    pub fn build(options: &PromptOptions) -> String {
        let mut prompt = format!(
            "{} about '{}'. ",
            Self::content_instruction(&options.content_type, options.length_words),
            options.keyword
        );

        let clauses = [
            Self::language_clause(&options.language),
            Self::tone_clause(&options.tone),
            Self::audience_clause(&options.audience),
            Self::rhyme_clause(&options.content_type, &options.rhyme_scheme),
        ];

        for clause in clauses.into_iter().flatten() {
            prompt.push_str(&clause);
            prompt.push_str(". ");
        }

        prompt.trim_end().to_string()
    }

    fn content_instruction(content_type: &str, length_words: u32) -> String {
        match content_type {
            "Quote" => "Write a memorable, inspiring quote".to_string(),
            "Poem" => format!("Create a {}-word poem (3-8 lines preferred)", length_words),
            "Haiku" => "Write a traditional 3-line Haiku (5-7-5 syllable pattern)".to_string(),
            "Motivational Saying" => "Create an uplifting motivational saying".to_string(),
            "Social Media Caption" => {
                "Write a catchy social media caption (under 280 characters)".to_string()
            }
            "Song Lyrics" => "Write song lyrics with rhythm and flow".to_string(),
            "Story Beginning" => "Write an engaging story opening paragraph".to_string(),
            _ => "Write content".to_string(),
        }
    }

    fn language_clause(language: &str) -> Option<String> {
        if language.is_empty() || language == DEFAULT_LANGUAGE {
            return None;
        }
        Some(format!("Write in {} language", language))
    }

    fn tone_clause(tone: &str) -> Option<String> {
        let clause = match tone {
            "" | DEFAULT_TONE => return None,
            "Funny" => "Make it humorous and witty".to_string(),
            "Serious" => "Keep it thoughtful and profound".to_string(),
            "Romantic" => "Make it romantic and heartfelt".to_string(),
            "Professional" => "Keep it professional and polished".to_string(),
            other => format!("Use a {} tone", other.to_lowercase()),
        };
        Some(clause)
    }

    fn audience_clause(audience: &str) -> Option<String> {
        let clause = match audience {
            "" | DEFAULT_AUDIENCE => return None,
            "Kids" => "Use simple, fun language suitable for children".to_string(),
            "Adults" => "Use mature, sophisticated language".to_string(),
            "Professionals" => "Use formal, business-appropriate language".to_string(),
            other => format!("Write for {}", other),
        };
        Some(clause)
    }

    fn rhyme_clause(content_type: &str, rhyme_scheme: &str) -> Option<String> {
        if content_type != "Poem" {
            return None;
        }
        let clause = match rhyme_scheme {
            "" | FREE_VERSE => return None,
            "ABAB" => "Use ABAB rhyme scheme".to_string(),
            "AABB" => "Use AABB rhyme scheme (couplets)".to_string(),
            "ABCB" => "Use ABCB rhyme scheme".to_string(),
            other => format!("Use {} rhyme scheme", other),
        };
        Some(clause)
    }
}
