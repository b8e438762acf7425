use super::content_record::ContentRecord;

pub const EXPORT_TITLE: &str = "AI Quote & Poem Generator - Content History";
pub const EXPORT_FILE_NAME: &str = "content_history.txt";

/// Plain-text rendering of the whole history, records in store order.
pub fn format_history(records: &[ContentRecord]) -> String {
    let mut content = format!("{}\n{}\n\n", EXPORT_TITLE, "=".repeat(50));
    for record in records {
        content.push_str(&format_record(record));
    }
    content
}

fn format_record(record: &ContentRecord) -> String {
    let draft = &record.draft;
    let tags = if draft.tags.trim().is_empty() {
        "None"
    } else {
        draft.tags.as_str()
    };

    format!(
        "ID: {}\nKeyword: {}\nType: {}\nLanguage: {}\nTone: {}\nDate: {}\nFavorite: {}\nTags: {}\nContent:\n{}\n{}\n\n",
        record.id,
        draft.keyword,
        draft.content_type,
        draft.language,
        draft.tone,
        record.timestamp,
        if record.favorite { "Yes" } else { "No" },
        tags,
        draft.output,
        "-".repeat(30)
    )
}

/// `{keyword}_{content_type}.txt`, restricted to characters that are safe in
/// a file name and a `Content-Disposition` header.
pub fn download_file_name(record: &ContentRecord) -> String {
    let sanitize = |value: &str| -> String {
        value
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    };

    format!(
        "{}_{}.txt",
        sanitize(record.draft.keyword.trim()),
        sanitize(record.draft.content_type.trim())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::content_record::ContentDraft;

    fn record(id: u64, keyword: &str, tags: &str, favorite: bool) -> ContentRecord {
        ContentRecord {
            id,
            draft: ContentDraft {
                keyword: keyword.to_string(),
                content_type: "Quote".to_string(),
                language: "English".to_string(),
                tone: "Funny".to_string(),
                tags: tags.to_string(),
                output: format!("About {}", keyword),
                ..ContentDraft::default()
            },
            timestamp: "2026-03-01T10:00:00+00:00".to_string(),
            favorite,
        }
    }

    #[test]
    fn empty_history_exports_header_only() {
        assert_eq!(format_history(&[]), format!("{}\n{}\n\n", EXPORT_TITLE, "=".repeat(50)));
    }

    #[test]
    fn record_block_has_fixed_labels() {
        let text = format_history(&[record(7, "coffee", "", true)]);

        let expected_block = "ID: 7\nKeyword: coffee\nType: Quote\nLanguage: English\nTone: Funny\n\
                              Date: 2026-03-01T10:00:00+00:00\nFavorite: Yes\nTags: None\n\
                              Content:\nAbout coffee\n------------------------------\n\n";
        assert!(text.ends_with(expected_block));
    }

    #[test]
    fn export_contains_every_id_and_keyword_in_order() {
        let records = vec![
            record(2, "winter", "cold", false),
            record(1, "summer", "", false),
            record(10, "autumn", "leaves, gold", true),
        ];
        let text = format_history(&records);

        for r in &records {
            assert!(text.contains(&format!("ID: {}", r.id)));
            assert!(text.contains(&r.draft.keyword));
        }
        let winter = text.find("winter").unwrap();
        let summer = text.find("summer").unwrap();
        let autumn = text.find("autumn").unwrap();
        assert!(winter < summer && summer < autumn);
        assert!(text.contains("Tags: leaves, gold"));
    }

    #[test]
    fn download_name_is_header_safe() {
        let mut r = record(1, "love/\"hate\"", "", false);
        r.draft.content_type = "Song Lyrics".to_string();
        assert_eq!(download_file_name(&r), "love__hate__Song Lyrics.txt");

        let r = record(2, "प्रेम", "", false);
        assert_eq!(download_file_name(&r), "______Quote.txt");
    }
}
