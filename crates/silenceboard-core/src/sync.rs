use chrono::{DateTime, Utc};

use crate::alertmanager::AlertmanagerClient;
use crate::block::merge_section;
use crate::config::SyncConfig;
use crate::error::Result;
use crate::github::GithubClient;
use crate::models::{
    Discussion, DiscussionTarget, DiscussionUpdate, NewDiscussion, PreparedUpdate, PublishAction,
    SyncOutcome,
};
use crate::render::render_section;
use crate::silences::{CommentFilter, select_active};

/// One-shot job: snapshot silences, merge them into the discussion, write once.
#[derive(Debug, Clone)]
pub struct SilenceBoard {
    config: SyncConfig,
    filter: CommentFilter,
    alertmanager: AlertmanagerClient,
    github: GithubClient,
}

impl SilenceBoard {
    pub fn new(config: SyncConfig) -> Result<Self> {
        config.validate()?;
        let filter = CommentFilter::new(&config.comment_filter)?;
        let alertmanager = AlertmanagerClient::new(&config.alertmanager)?;
        let github = GithubClient::new(&config.github)?;
        Ok(Self {
            config,
            filter,
            alertmanager,
            github,
        })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Computes the new discussion body without writing it.
    pub fn prepare(&self, now: DateTime<Utc>) -> Result<PreparedUpdate> {
        let silences = self.alertmanager.list_silences()?;
        let rows = select_active(&silences, &self.filter, now);
        tracing::info!(
            total = silences.len(),
            published = rows.len(),
            alertmanager = self.alertmanager.base_url(),
            "fetched silences"
        );

        let section = render_section(&self.config.section_name, &rows, now)?;

        let scope = &self.config.discussion;
        let team = self.github.find_team(&scope.org, &scope.team)?;
        tracing::info!(org = %scope.org, team = %team.slug, team_id = team.id, "resolved team");

        let discussions = self.github.list_discussions(&scope.org, &team.slug)?;
        let existing = select_discussion(&discussions, &scope.title);
        let current_body = existing
            .and_then(|discussion| discussion.body.as_deref())
            .unwrap_or_default();
        let target = match existing {
            Some(discussion) => DiscussionTarget::Update {
                number: discussion.number,
            },
            None => DiscussionTarget::Create,
        };

        let body = merge_section(current_body, &self.config.section_name, &section);
        Ok(PreparedUpdate {
            team_slug: team.slug,
            title: scope.title.clone(),
            target,
            silences_total: silences.len(),
            silences_published: rows.len(),
            body,
        })
    }

    pub fn publish(&self, prepared: PreparedUpdate) -> Result<SyncOutcome> {
        let org = &self.config.discussion.org;
        let (action, discussion) = match prepared.target {
            DiscussionTarget::Create => {
                let request = NewDiscussion {
                    title: prepared.title.clone(),
                    body: prepared.body,
                    pinned: true,
                };
                let created = self
                    .github
                    .create_discussion(org, &prepared.team_slug, &request)?;
                (PublishAction::Created, created)
            }
            DiscussionTarget::Update { number } => {
                let update = DiscussionUpdate {
                    body: prepared.body,
                };
                let updated =
                    self.github
                        .update_discussion(org, &prepared.team_slug, number, &update)?;
                (PublishAction::Updated, updated)
            }
        };
        tracing::info!(
            ?action,
            number = discussion.number,
            title = %discussion.title,
            "published silence overview"
        );

        Ok(SyncOutcome {
            action,
            discussion_number: discussion.number,
            title: prepared.title,
            silences_total: prepared.silences_total,
            silences_published: prepared.silences_published,
        })
    }

    pub fn run(&self, now: DateTime<Utc>) -> Result<SyncOutcome> {
        let prepared = self.prepare(now)?;
        self.publish(prepared)
    }
}

/// First discussion whose title matches exactly.
pub fn select_discussion<'a>(discussions: &'a [Discussion], title: &str) -> Option<&'a Discussion> {
    let mut matches = discussions.iter().filter(|discussion| discussion.title == title);
    let first = matches.next()?;
    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(title, number = first.number, extra, "duplicate discussion titles, using first match");
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discussion(number: u64, title: &str) -> Discussion {
        Discussion {
            number,
            title: title.to_string(),
            body: Some(format!("body {number}")),
            pinned: false,
        }
    }

    #[test]
    fn select_discussion_takes_first_exact_title_match() {
        let discussions = vec![
            discussion(1, "Silence Overview (old)"),
            discussion(2, "Silence Overview"),
            discussion(3, "Silence Overview"),
        ];
        let selected = select_discussion(&discussions, "Silence Overview").expect("match");
        assert_eq!(selected.number, 2);
    }

    #[test]
    fn select_discussion_is_case_sensitive() {
        let discussions = vec![discussion(1, "silence overview")];
        assert!(select_discussion(&discussions, "Silence Overview").is_none());
    }

    #[test]
    fn new_rejects_invalid_configuration_before_any_io() {
        let config = SyncConfig {
            section_name: "bad-->name".to_string(),
            ..SyncConfig::default()
        };
        let err = SilenceBoard::new(config).expect_err("invalid name");
        assert_eq!(err.code(), "INVALID_CONFIG");
    }
}
