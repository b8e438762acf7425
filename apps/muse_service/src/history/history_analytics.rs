use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::content_record::ContentRecord;

const RECENT_LIMIT: usize = 5;
const POPULAR_KEYWORD_LIMIT: usize = 10;
const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentActivity {
    pub id: u64,
    pub content_type: String,
    pub keyword: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryAnalytics {
    pub total: usize,
    pub favorites: usize,
    pub languages_used: usize,
    pub content_types_used: usize,
    pub type_counts: BTreeMap<String, usize>,
    pub language_counts: BTreeMap<String, usize>,
    pub recent: Vec<RecentActivity>,
    pub popular_keywords: Vec<KeywordCount>,
}

fn or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

fn count_by<'a>(values: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(or_unknown(value)).or_insert(0) += 1;
    }
    counts
}

impl HistoryAnalytics {
    pub fn from_records(records: &[ContentRecord]) -> Self {
        let type_counts = count_by(records.iter().map(|r| r.draft.content_type.as_str()));
        let language_counts = count_by(records.iter().map(|r| r.draft.language.as_str()));

        let languages_used = records
            .iter()
            .map(|r| r.draft.language.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        let content_types_used = records
            .iter()
            .map(|r| r.draft.content_type.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            total: records.len(),
            favorites: records.iter().filter(|r| r.favorite).count(),
            languages_used,
            content_types_used,
            type_counts,
            language_counts,
            recent: Self::recent(records),
            popular_keywords: Self::popular_keywords(records),
        }
    }

    /// Newest first by timestamp string; RFC 3339 timestamps sort correctly as
    /// text.
    fn recent(records: &[ContentRecord]) -> Vec<RecentActivity> {
        let mut sorted: Vec<&ContentRecord> = records.iter().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        sorted
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|r| RecentActivity {
                id: r.id,
                content_type: or_unknown(&r.draft.content_type),
                keyword: or_unknown(&r.draft.keyword),
                date: r.timestamp.get(..10).unwrap_or(&r.timestamp).to_string(),
            })
            .collect()
    }

    fn popular_keywords(records: &[ContentRecord]) -> Vec<KeywordCount> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in records {
            let keyword = record.draft.keyword.trim().to_lowercase();
            if !keyword.is_empty() {
                *counts.entry(keyword).or_insert(0) += 1;
            }
        }

        let mut popular: Vec<KeywordCount> = counts
            .into_iter()
            .map(|(keyword, count)| KeywordCount { keyword, count })
            .collect();
        popular.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
        popular.truncate(POPULAR_KEYWORD_LIMIT);
        popular
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::content_record::ContentDraft;

    fn record(id: u64, keyword: &str, content_type: &str, language: &str, day: u32) -> ContentRecord {
        ContentRecord {
            id,
            draft: ContentDraft {
                keyword: keyword.to_string(),
                content_type: content_type.to_string(),
                language: language.to_string(),
                ..ContentDraft::default()
            },
            timestamp: format!("2026-05-{:02}T08:30:00+00:00", day),
            favorite: id % 2 == 0,
        }
    }

    #[test]
    fn empty_history_has_zeroed_analytics() {
        let analytics = HistoryAnalytics::from_records(&[]);
        assert_eq!(analytics.total, 0);
        assert!(analytics.type_counts.is_empty());
        assert!(analytics.recent.is_empty());
        assert!(analytics.popular_keywords.is_empty());
    }

    #[test]
    fn counts_types_languages_and_favorites() {
        let records = vec![
            record(1, "Love", "Quote", "English", 1),
            record(2, "love", "Poem", "French", 2),
            record(3, "rain", "Poem", "English", 3),
            record(4, "sun", "Haiku", "", 4),
        ];
        let analytics = HistoryAnalytics::from_records(&records);

        assert_eq!(analytics.total, 4);
        assert_eq!(analytics.favorites, 2);
        assert_eq!(analytics.languages_used, 3);
        assert_eq!(analytics.content_types_used, 3);
        assert_eq!(analytics.type_counts["Poem"], 2);
        assert_eq!(analytics.language_counts["English"], 2);
        assert_eq!(analytics.language_counts["Unknown"], 1);
    }

    #[test]
    fn recent_lists_five_newest_first() {
        let records: Vec<ContentRecord> = (1..=7)
            .map(|i| record(i as u64, &format!("k{}", i), "Quote", "English", i))
            .collect();
        let recent = HistoryAnalytics::from_records(&records).recent;

        let ids: Vec<u64> = recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
        assert_eq!(recent[0].date, "2026-05-07");
    }

    #[test]
    fn popular_keywords_are_case_folded_and_ranked() {
        let records = vec![
            record(1, "Love", "Quote", "English", 1),
            record(2, "love", "Quote", "English", 2),
            record(3, "Rain", "Quote", "English", 3),
            record(4, "dreams", "Quote", "English", 4),
            record(5, "dreams", "Quote", "English", 5),
            record(6, "", "Quote", "English", 6),
        ];
        let popular = HistoryAnalytics::from_records(&records).popular_keywords;

        assert_eq!(
            popular,
            vec![
                KeywordCount { keyword: "dreams".to_string(), count: 2 },
                KeywordCount { keyword: "love".to_string(), count: 2 },
                KeywordCount { keyword: "rain".to_string(), count: 1 },
            ]
        );
    }
}
