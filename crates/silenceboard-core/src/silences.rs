use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::Result;
use crate::models::{Matcher, Silence, SilenceRow};

/// Excludes silences whose comment matches a regular expression.
///
/// An empty pattern disables exclusion; an empty regex would otherwise match
/// every comment and hide all silences.
#[derive(Debug, Clone)]
pub struct CommentFilter {
    pattern: Option<Regex>,
}

impl CommentFilter {
    pub fn new(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Ok(Self { pattern: None });
        }
        Ok(Self {
            pattern: Some(Regex::new(raw)?),
        })
    }

    pub fn excludes(&self, comment: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(comment))
    }
}

/// Keeps live, non-excluded silences in upstream order.
pub fn select_active(silences: &[Silence], filter: &CommentFilter, now: DateTime<Utc>) -> Vec<SilenceRow> {
    silences
        .iter()
        .filter(|silence| silence.ends_at > now && !filter.excludes(&silence.comment))
        .map(silence_row)
        .collect()
}

pub fn silence_row(silence: &Silence) -> SilenceRow {
    SilenceRow {
        comment: silence.comment.clone(),
        created_by: silence.created_by.clone(),
        ends_at: silence.ends_at,
        matcher_id: matcher_identifier(&silence.matchers),
    }
}

/// `[a="x" b=~"y"]` with pipes escaped and quotes dropped.
pub fn matcher_identifier(matchers: &[Matcher]) -> String {
    let joined = matchers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    format!("[{joined}]").replace('|', "\\|").replace('"', "")
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).single().expect("valid time")
    }

    fn silence(id: &str, comment: &str, ends_at: DateTime<Utc>) -> Silence {
        Silence {
            id: id.to_string(),
            comment: comment.to_string(),
            created_by: "oncall".to_string(),
            matchers: vec![Matcher {
                name: "alertname".to_string(),
                value: "DiskFull".to_string(),
                is_regex: false,
                is_equal: true,
            }],
            starts_at: now() - Duration::days(1),
            ends_at,
            updated_at: None,
            status: None,
        }
    }

    #[test]
    fn select_active_drops_excluded_and_expired_silences() {
        let filter = CommentFilter::new("automated silence|silenced our tenants").expect("filter");
        let silences = vec![
            silence("keep-1", "db maintenance", now() + Duration::hours(2)),
            silence("auto", "automated silence for rollout", now() + Duration::hours(2)),
            silence("expired", "old work", now() - Duration::minutes(1)),
            silence("edge", "ends exactly now", now()),
            silence("tenant", "we silenced our tenants", now() + Duration::days(3)),
            silence("keep-2", "network upgrade", now() + Duration::days(3)),
        ];

        let rows = select_active(&silences, &filter, now());
        let comments = rows.iter().map(|row| row.comment.as_str()).collect::<Vec<_>>();
        assert_eq!(comments, vec!["db maintenance", "network upgrade"]);
    }

    #[test]
    fn select_active_matches_filter_definition_for_every_silence() {
        let filter = CommentFilter::new("skip").expect("filter");
        let offsets = [-90_i64, -1, 0, 1, 90];
        let comments = ["skip me", "keep me", "", "SKIP uppercase"];
        let mut silences = Vec::new();
        for (i, offset) in offsets.iter().enumerate() {
            for (j, comment) in comments.iter().enumerate() {
                silences.push(silence(
                    &format!("{i}-{j}"),
                    comment,
                    now() + Duration::seconds(*offset),
                ));
            }
        }

        let rows = select_active(&silences, &filter, now());
        let expected = silences
            .iter()
            .filter(|s| !s.comment.contains("skip") && s.ends_at > now())
            .map(|s| s.comment.clone())
            .collect::<Vec<_>>();
        let actual = rows.into_iter().map(|row| row.comment).collect::<Vec<_>>();
        assert_eq!(actual, expected);
    }

    #[test]
    fn empty_filter_keeps_every_live_silence() {
        let filter = CommentFilter::new("").expect("filter");
        assert!(!filter.excludes("anything at all"));
        let silences = vec![silence("a", "automated silence", now() + Duration::hours(1))];
        assert_eq!(select_active(&silences, &filter, now()).len(), 1);
    }

    #[test]
    fn matcher_identifier_escapes_pipes_and_strips_quotes() {
        let matchers = vec![
            Matcher {
                name: "alertname".to_string(),
                value: "DiskFull|MemoryFull".to_string(),
                is_regex: true,
                is_equal: true,
            },
            Matcher {
                name: "cluster".to_string(),
                value: "c01p005".to_string(),
                is_regex: false,
                is_equal: false,
            },
        ];
        let id = matcher_identifier(&matchers);
        assert_eq!(id, "[alertname=~DiskFull\\|MemoryFull cluster!=c01p005]");
        assert!(!id.contains('"'));
        assert_eq!(id.matches('|').count(), id.matches("\\|").count());
    }

    #[test]
    fn matcher_identifier_stays_on_one_line_for_control_characters() {
        let matchers = vec![Matcher {
            name: "msg".to_string(),
            value: "a\nb`c".to_string(),
            is_regex: false,
            is_equal: true,
        }];
        let id = matcher_identifier(&matchers);
        assert_eq!(id, "[msg=a\\nb`c]");
        assert!(!id.contains(['\n', '\r']));
    }

    #[test]
    fn matcher_identifier_of_no_matchers_is_empty_brackets() {
        assert_eq!(matcher_identifier(&[]), "[]");
    }
}
