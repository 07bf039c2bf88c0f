use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::jobs::models::Job;
use crate::models::dashboard::{AnnouncementRow, ProjectSummaryRow, StageCountRow};
use crate::models::enums::{AnnouncementSeverity, ApplicationStage};

pub const CATEGORY_SHORTCUTS: [&str; 5] = [
    "ハイクラス",
    "コンサルティング",
    "地方×リモート",
    "即戦力CS",
    "デザイン/UX",
];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub active_candidates: i64,
    pub interviews_this_week: i64,
    pub offers_pending: i64,
    pub placements: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FunnelEntry {
    pub label: String,
    pub value: i64,
    /// Week-over-week change. Not tracked yet, always 0.
    pub trend: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub severity: AnnouncementSeverity,
    pub published_at: DateTime<Utc>,
}

impl From<AnnouncementRow> for Announcement {
    fn from(row: AnnouncementRow) -> Self {
        Announcement {
            id: row.id,
            title: row.title,
            body: row.body,
            severity: row.severity,
            published_at: row.published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub job_count: i64,
    pub candidate_count: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectSummaryRow> for Project {
    fn from(row: ProjectSummaryRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description.unwrap_or_default(),
            job_count: row.job_count,
            candidate_count: row.candidate_count,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub kpis: Kpis,
    pub funnel: Vec<FunnelEntry>,
    pub new_jobs: Vec<Job>,
    pub announcements: Vec<Announcement>,
    pub projects: Vec<Project>,
    pub category_shortcuts: Vec<String>,
}

/// Application counts per stage; stages without rows count as zero.
#[derive(Debug, Clone, Default)]
pub struct StageCounts(HashMap<ApplicationStage, i64>);

impl StageCounts {
    pub fn get(&self, stage: ApplicationStage) -> i64 {
        self.0.get(&stage).copied().unwrap_or(0)
    }

    fn interviews(&self) -> i64 {
        self.get(ApplicationStage::FirstInterview) + self.get(ApplicationStage::SecondInterview)
    }
}

impl FromIterator<StageCountRow> for StageCounts {
    fn from_iter<I: IntoIterator<Item = StageCountRow>>(rows: I) -> Self {
        let mut counts = HashMap::new();
        for row in rows {
            *counts.entry(ApplicationStage::from(row.stage)).or_insert(0) += row.count;
        }
        StageCounts(counts)
    }
}

pub fn build_kpis(candidate_count: i64, counts: &StageCounts) -> Kpis {
    Kpis {
        active_candidates: candidate_count,
        interviews_this_week: counts.interviews(),
        offers_pending: counts.get(ApplicationStage::Offer),
        placements: counts.get(ApplicationStage::Hired),
    }
}

pub fn build_funnel(counts: &StageCounts) -> Vec<FunnelEntry> {
    let entry = |label: &str, value: i64| FunnelEntry {
        label: label.to_string(),
        value,
        trend: 0,
    };
    vec![
        entry("スクリーニング", counts.get(ApplicationStage::Screening)),
        entry("推薦済み", counts.get(ApplicationStage::Document)),
        entry("面接中", counts.interviews()),
        entry("オファー", counts.get(ApplicationStage::Offer)),
    ]
}
