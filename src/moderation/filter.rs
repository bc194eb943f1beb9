// src/moderation/filter.rs
//! Client-side filter and sort pipeline over the fetched job collection

use serde_json::Value;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::types::job::{CreatorType, DerivedStatus, Job};
use crate::utils::{normalize_search, parse_timestamp_millis};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    fn matches(&self, status: &DerivedStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => *status == DerivedStatus::Pending,
            StatusFilter::Approved => *status == DerivedStatus::Approved,
            StatusFilter::Rejected => *status == DerivedStatus::Rejected,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "approved" => Ok(StatusFilter::Approved),
            "rejected" => Ok(StatusFilter::Rejected),
            other => anyhow::bail!(
                "Unknown status filter: {}. Use all, pending, approved or rejected",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CreatedAt,
    Title,
    Company,
    ViewCount,
    ApplicationCount,
    Status,
    /// Any other server field, compared by its raw value
    Field(String),
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "created_at" => SortKey::CreatedAt,
            "title" => SortKey::Title,
            "company" => SortKey::Company,
            "view_count" => SortKey::ViewCount,
            "application_count" => SortKey::ApplicationCount,
            "status" => SortKey::Status,
            other => SortKey::Field(other.to_string()),
        }
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        match self {
            // Unparseable timestamps become None and sort lowest
            SortKey::CreatedAt => {
                parse_timestamp_millis(&a.created_at).cmp(&parse_timestamp_millis(&b.created_at))
            }
            SortKey::Title => compare_text(&a.title, &b.title),
            SortKey::Company => compare_text(&a.company, &b.company),
            SortKey::ViewCount => a.view_count.cmp(&b.view_count),
            SortKey::ApplicationCount => a.application_count.cmp(&b.application_count),
            SortKey::Status => compare_text(a.derived_status().label(), b.derived_status().label()),
            SortKey::Field(name) => compare_raw(a.field_value(name), b.field_value(name)),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_raw(a: Option<Value>, b: Option<Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => raw_text(&a).cmp(&raw_text(&b)),
        },
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// All facets of the job table filter; facets combine with AND
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search: String,
    pub status: StatusFilter,
    pub creator: Option<CreatorType>,
    pub category: Option<String>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

impl FilterState {
    pub fn matches(&self, job: &Job) -> bool {
        self.matches_search(job)
            && self.status.matches(&job.derived_status())
            && self
                .creator
                .as_ref()
                .map_or(true, |creator| job.created_by_type == *creator)
            && self.matches_category(job)
    }

    fn matches_search(&self, job: &Job) -> bool {
        let Some(needle) = normalize_search(&self.search) else {
            return true;
        };

        [&job.title, &job.company, &job.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, job: &Job) -> bool {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(wanted) if wanted.eq_ignore_ascii_case("all") => true,
            Some(wanted) => job
                .category
                .as_deref()
                .is_some_and(|category| category.trim().eq_ignore_ascii_case(wanted)),
        }
    }

    /// Filter then sort; the sort is stable so equal keys keep server order
    pub fn apply(&self, jobs: &[Job]) -> Vec<Job> {
        let mut filtered: Vec<Job> = jobs.iter().filter(|job| self.matches(job)).cloned().collect();

        filtered.sort_by(|a, b| {
            let ordering = self.sort_key.compare(a, b);
            match self.sort_direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: i64, title: &str, status: &str, approved: bool) -> Job {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "company": "Acme",
            "description": "",
            "status": status,
            "approved_by_admin": approved,
            "created_at": format!("2024-01-{:02}T00:00:00Z", id),
        }))
        .unwrap()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let jobs = vec![job(1, "Senior React Developer", "active", true)];

        for needle in ["react", "REACT", "  React "] {
            let filter = FilterState {
                search: needle.to_string(),
                ..Default::default()
            };
            assert_eq!(filter.apply(&jobs).len(), 1, "needle {:?}", needle);
        }
    }

    #[test]
    fn test_search_covers_company_and_description() {
        let mut by_company = job(1, "Engineer", "active", true);
        by_company.company = "Rustacean Labs".to_string();
        let mut by_description = job(2, "Engineer", "active", true);
        by_description.description = "Work on rustc".to_string();
        let other = job(3, "Designer", "active", true);

        let filter = FilterState {
            search: "rust".to_string(),
            ..Default::default()
        };
        let ids: Vec<i64> = filter
            .apply(&[by_company, by_description, other])
            .iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_status_filter_uses_derived_status() {
        let jobs = vec![
            job(1, "a", "pending_approval", false),
            job(2, "b", "active", false),
            job(3, "c", "active", true),
            job(4, "d", "inactive", false),
        ];

        let pending = FilterState {
            status: StatusFilter::Pending,
            ..Default::default()
        };
        let mut ids: Vec<i64> = pending.apply(&jobs).iter().map(|j| j.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);

        let rejected = FilterState {
            status: StatusFilter::Rejected,
            ..Default::default()
        };
        assert_eq!(rejected.apply(&jobs)[0].id, 4);
    }

    #[test]
    fn test_facets_combine_with_and() {
        let mut a = job(1, "Rust Engineer", "active", true);
        a.category = Some("Engineering".to_string());
        a.created_by_type = CreatorType::Scraper;
        let mut b = job(2, "Rust Engineer", "active", true);
        b.category = Some("Engineering".to_string());
        let mut c = job(3, "Rust Engineer", "pending_approval", false);
        c.category = Some("Engineering".to_string());
        c.created_by_type = CreatorType::Scraper;
        let jobs = vec![a, b, c];

        let filter = FilterState {
            search: "rust".to_string(),
            status: StatusFilter::Approved,
            creator: Some(CreatorType::Scraper),
            category: Some("engineering".to_string()),
            ..Default::default()
        };

        let result = filter.apply(&jobs);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
        for item in &result {
            assert!(jobs.contains(item));
            assert!(filter.matches(item));
        }
    }

    #[test]
    fn test_missing_category_never_matches_specific_category() {
        let jobs = vec![job(1, "a", "active", true)];
        let filter = FilterState {
            category: Some("Sales".to_string()),
            ..Default::default()
        };
        assert!(filter.apply(&jobs).is_empty());
    }

    #[test]
    fn test_all_category_disables_facet_in_any_case() {
        let mut tagged = job(1, "a", "active", true);
        tagged.category = Some("Sales".to_string());
        let jobs = vec![tagged, job(2, "b", "active", true)];

        for value in ["all", "All", " ALL "] {
            let filter = FilterState {
                category: Some(value.to_string()),
                ..Default::default()
            };
            assert_eq!(filter.apply(&jobs).len(), 2, "category {:?}", value);
        }
    }

    #[test]
    fn test_created_at_sorts_by_instant() {
        let mut early = job(1, "early", "active", true);
        early.created_at = "2024-05-01T09:00:00+02:00".to_string();
        let mut late = job(2, "late", "active", true);
        late.created_at = "2024-05-01T08:30:00Z".to_string();
        let mut broken = job(3, "broken", "active", true);
        broken.created_at = "not a date".to_string();

        let filter = FilterState {
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };
        let ids: Vec<i64> = filter
            .apply(&[late.clone(), early.clone(), broken.clone()])
            .iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let newest_first = FilterState::default();
        let ids: Vec<i64> = newest_first
            .apply(&[late, early, broken])
            .iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_missing_counts_sort_lowest() {
        let mut none = job(1, "a", "active", true);
        none.view_count = None;
        let mut few = job(2, "b", "active", true);
        few.view_count = Some(3);
        let mut many = job(3, "c", "active", true);
        many.view_count = Some(40);

        let filter = FilterState {
            sort_key: SortKey::ViewCount,
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&[many, none, few]).iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_sort_key_compares_raw_field() {
        let mut low = job(1, "a", "active", true);
        low.extra.insert("salary_max".to_string(), serde_json::json!(50000));
        let mut high = job(2, "b", "active", true);
        high.extra.insert("salary_max".to_string(), serde_json::json!(120000));
        let missing = job(3, "c", "active", true);

        let filter = FilterState {
            sort_key: SortKey::parse("salary_max"),
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };
        let ids: Vec<i64> = filter
            .apply(&[high, missing, low])
            .iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_status_filter_from_str() {
        assert_eq!("Pending".parse::<StatusFilter>().unwrap(), StatusFilter::Pending);
        assert!("archived".parse::<StatusFilter>().is_err());
    }
}
