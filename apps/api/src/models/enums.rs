//! Domain enumerations and their storage counterparts.
//!
//! Each concept exists twice: a domain enum serialized in the API's casing
//! (`firstInterview`, `full-time`) and a `Stored*` enum mirroring the Postgres
//! enum type (`FIRST_INTERVIEW`, `FULL_TIME`). Conversions are exhaustive
//! `match`es in both directions, so adding a variant to either side fails to
//! compile until the mapping is updated.

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo};

// ────────────────────────────────────────────────────────────────────────────
// Candidate status
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateStatus {
    New,
    Screening,
    Submitted,
    Interview,
    Offer,
    Placed,
    Archived,
}

impl CandidateStatus {
    pub const ALL: [CandidateStatus; 7] = [
        CandidateStatus::New,
        CandidateStatus::Screening,
        CandidateStatus::Submitted,
        CandidateStatus::Interview,
        CandidateStatus::Offer,
        CandidateStatus::Placed,
        CandidateStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CandidateStatus::New => "new",
            CandidateStatus::Screening => "screening",
            CandidateStatus::Submitted => "submitted",
            CandidateStatus::Interview => "interview",
            CandidateStatus::Offer => "offer",
            CandidateStatus::Placed => "placed",
            CandidateStatus::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "candidate_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoredCandidateStatus {
    New,
    Screening,
    Submitted,
    Interview,
    Offer,
    Placed,
    Archived,
}

impl PgHasArrayType for StoredCandidateStatus {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_candidate_status")
    }
}

impl From<StoredCandidateStatus> for CandidateStatus {
    fn from(status: StoredCandidateStatus) -> Self {
        match status {
            StoredCandidateStatus::New => CandidateStatus::New,
            StoredCandidateStatus::Screening => CandidateStatus::Screening,
            StoredCandidateStatus::Submitted => CandidateStatus::Submitted,
            StoredCandidateStatus::Interview => CandidateStatus::Interview,
            StoredCandidateStatus::Offer => CandidateStatus::Offer,
            StoredCandidateStatus::Placed => CandidateStatus::Placed,
            StoredCandidateStatus::Archived => CandidateStatus::Archived,
        }
    }
}

impl From<CandidateStatus> for StoredCandidateStatus {
    fn from(status: CandidateStatus) -> Self {
        match status {
            CandidateStatus::New => StoredCandidateStatus::New,
            CandidateStatus::Screening => StoredCandidateStatus::Screening,
            CandidateStatus::Submitted => StoredCandidateStatus::Submitted,
            CandidateStatus::Interview => StoredCandidateStatus::Interview,
            CandidateStatus::Offer => StoredCandidateStatus::Offer,
            CandidateStatus::Placed => StoredCandidateStatus::Placed,
            CandidateStatus::Archived => StoredCandidateStatus::Archived,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job status
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Paused,
    Closed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Open, JobStatus::Paused, JobStatus::Closed];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Paused => "paused",
            JobStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoredJobStatus {
    Open,
    Paused,
    Closed,
}

impl From<StoredJobStatus> for JobStatus {
    fn from(status: StoredJobStatus) -> Self {
        match status {
            StoredJobStatus::Open => JobStatus::Open,
            StoredJobStatus::Paused => JobStatus::Paused,
            StoredJobStatus::Closed => JobStatus::Closed,
        }
    }
}

impl From<JobStatus> for StoredJobStatus {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Open => StoredJobStatus::Open,
            JobStatus::Paused => StoredJobStatus::Paused,
            JobStatus::Closed => StoredJobStatus::Closed,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Employment type
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    Contract,
    Temporary,
    Internship,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        EmploymentType::FullTime,
        EmploymentType::Contract,
        EmploymentType::Temporary,
        EmploymentType::Internship,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::Contract => "contract",
            EmploymentType::Temporary => "temporary",
            EmploymentType::Internship => "internship",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "employment_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoredEmploymentType {
    FullTime,
    Contract,
    Temporary,
    Internship,
}

impl From<StoredEmploymentType> for EmploymentType {
    fn from(kind: StoredEmploymentType) -> Self {
        match kind {
            StoredEmploymentType::FullTime => EmploymentType::FullTime,
            StoredEmploymentType::Contract => EmploymentType::Contract,
            StoredEmploymentType::Temporary => EmploymentType::Temporary,
            StoredEmploymentType::Internship => EmploymentType::Internship,
        }
    }
}

impl From<EmploymentType> for StoredEmploymentType {
    fn from(kind: EmploymentType) -> Self {
        match kind {
            EmploymentType::FullTime => StoredEmploymentType::FullTime,
            EmploymentType::Contract => StoredEmploymentType::Contract,
            EmploymentType::Temporary => StoredEmploymentType::Temporary,
            EmploymentType::Internship => StoredEmploymentType::Internship,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Application stage
// ────────────────────────────────────────────────────────────────────────────

/// Pipeline position of an application. Declaration order is board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationStage {
    Screening,
    Document,
    FirstInterview,
    SecondInterview,
    Offer,
    Hired,
    Rejected,
}

impl ApplicationStage {
    pub const ALL: [ApplicationStage; 7] = [
        ApplicationStage::Screening,
        ApplicationStage::Document,
        ApplicationStage::FirstInterview,
        ApplicationStage::SecondInterview,
        ApplicationStage::Offer,
        ApplicationStage::Hired,
        ApplicationStage::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStage::Screening => "screening",
            ApplicationStage::Document => "document",
            ApplicationStage::FirstInterview => "firstInterview",
            ApplicationStage::SecondInterview => "secondInterview",
            ApplicationStage::Offer => "offer",
            ApplicationStage::Hired => "hired",
            ApplicationStage::Rejected => "rejected",
        }
    }

    /// Board column heading.
    pub fn label(self) -> &'static str {
        match self {
            ApplicationStage::Screening => "書類確認",
            ApplicationStage::Document => "書類提出",
            ApplicationStage::FirstInterview => "一次面接",
            ApplicationStage::SecondInterview => "二次面接",
            ApplicationStage::Offer => "オファー",
            ApplicationStage::Hired => "入社",
            ApplicationStage::Rejected => "不合格",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "application_stage", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoredApplicationStage {
    Screening,
    Document,
    FirstInterview,
    SecondInterview,
    Offer,
    Hired,
    Rejected,
}

impl From<StoredApplicationStage> for ApplicationStage {
    fn from(stage: StoredApplicationStage) -> Self {
        match stage {
            StoredApplicationStage::Screening => ApplicationStage::Screening,
            StoredApplicationStage::Document => ApplicationStage::Document,
            StoredApplicationStage::FirstInterview => ApplicationStage::FirstInterview,
            StoredApplicationStage::SecondInterview => ApplicationStage::SecondInterview,
            StoredApplicationStage::Offer => ApplicationStage::Offer,
            StoredApplicationStage::Hired => ApplicationStage::Hired,
            StoredApplicationStage::Rejected => ApplicationStage::Rejected,
        }
    }
}

impl From<ApplicationStage> for StoredApplicationStage {
    fn from(stage: ApplicationStage) -> Self {
        match stage {
            ApplicationStage::Screening => StoredApplicationStage::Screening,
            ApplicationStage::Document => StoredApplicationStage::Document,
            ApplicationStage::FirstInterview => StoredApplicationStage::FirstInterview,
            ApplicationStage::SecondInterview => StoredApplicationStage::SecondInterview,
            ApplicationStage::Offer => StoredApplicationStage::Offer,
            ApplicationStage::Hired => StoredApplicationStage::Hired,
            ApplicationStage::Rejected => StoredApplicationStage::Rejected,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Application status
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Active,
    Blocked,
    Success,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoredApplicationStatus {
    Active,
    Blocked,
    Success,
    Lost,
}

impl From<StoredApplicationStatus> for ApplicationStatus {
    fn from(status: StoredApplicationStatus) -> Self {
        match status {
            StoredApplicationStatus::Active => ApplicationStatus::Active,
            StoredApplicationStatus::Blocked => ApplicationStatus::Blocked,
            StoredApplicationStatus::Success => ApplicationStatus::Success,
            StoredApplicationStatus::Lost => ApplicationStatus::Lost,
        }
    }
}

impl From<ApplicationStatus> for StoredApplicationStatus {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Active => StoredApplicationStatus::Active,
            ApplicationStatus::Blocked => StoredApplicationStatus::Blocked,
            ApplicationStatus::Success => StoredApplicationStatus::Success,
            ApplicationStatus::Lost => StoredApplicationStatus::Lost,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Single-representation enums (same spelling in storage and on the wire)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "agent_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Agent,
    Company,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Agent => "AGENT",
            Role::Company => "COMPANY",
            Role::Admin => "ADMIN",
        }
    }

    /// Case-insensitive, so `agent` and `AGENT` both parse.
    pub fn parse(value: &str) -> Option<Self> {
        [Role::Agent, Role::Company, Role::Admin]
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "announcement_severity", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementSeverity {
    Info,
    Warning,
}
