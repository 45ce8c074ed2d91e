use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seniority tag a job posting asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "experience_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entry" => Ok(ExperienceLevel::Entry),
            "junior" => Ok(ExperienceLevel::Junior),
            "mid" => Ok(ExperienceLevel::Mid),
            "senior" => Ok(ExperienceLevel::Senior),
            "lead" => Ok(ExperienceLevel::Lead),
            other => Err(format!(
                "unknown experience level '{}', expected one of: entry, junior, mid, senior, lead",
                other
            )),
        }
    }
}

/// Where the work happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "work_mode", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    #[default]
    Onsite,
    Remote,
    Hybrid,
}

impl FromStr for WorkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "onsite" => Ok(WorkMode::Onsite),
            "remote" => Ok(WorkMode::Remote),
            "hybrid" => Ok(WorkMode::Hybrid),
            other => Err(format!(
                "unknown work mode '{}', expected one of: onsite, remote, hybrid",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Jobseeker,
    Employer,
    Admin,
}

/// What the matcher knows about a job seeker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub user_id: i64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub years_of_experience: f64,
    #[serde(default)]
    pub expected_salary_min: Option<i64>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl CandidateProfile {
    /// Home city, treating an empty string as not set
    pub fn home_city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }
}

/// A job posting as stored on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: i64,
    pub employer_id: i64,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub job_type: String,
    #[serde(default)]
    pub work_mode: WorkMode,
    pub experience_level: ExperienceLevel,
    pub industry: String,
    pub category: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: String,
    #[serde(default)]
    pub allows_remote: bool,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: String,
    pub salary_period: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub applications_count: i64,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub application_deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    /// Job city, treating an empty string as not set
    pub fn job_city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether the posting accepts remote candidates
    pub fn offers_remote(&self) -> bool {
        self.allows_remote || self.work_mode == WorkMode::Remote
    }

    /// Minimum salary, treating zero as undeclared
    pub fn declared_salary_min(&self) -> Option<i64> {
        self.salary_min.filter(|s| *s > 0)
    }

    /// Part of the open pool: active and publicly visible.
    /// The application deadline does not take a posting out of the pool.
    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Active && self.visibility == Visibility::Public
    }
}

/// Score and reasons for one job against one candidate. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_id: i64,
    pub score: u8,
    pub reasons: Vec<String>,
}

/// A required skill the candidate lacks, with the jobs asking for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGap {
    pub name: String,
    pub count: usize,
    pub jobs: Vec<String>,
}

/// Point values for each scoring criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub experience: u32,
    pub skills: u32,
    pub location: u32,
    pub remote: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            experience: 30,
            skills: 50,
            location: 10,
            remote: 10,
        }
    }
}

/// Account record used for authorization decisions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub role: UserRole,
    pub company_name: Option<String>,
    pub is_active: bool,
}

/// A user's own view of their account and job seeker profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub years_of_experience: Option<f64>,
    pub expected_salary_min: Option<i64>,
    pub current_job_title: Option<String>,
    pub company_name: Option<String>,
    pub is_active: bool,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Job board listing filters. Empty fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub search: Option<String>,
    pub job_type: Option<String>,
    pub work_mode: Option<WorkMode>,
    pub experience_level: Option<ExperienceLevel>,
    pub city: Option<String>,
}

/// One page of a job listing
#[derive(Debug, Clone)]
pub struct JobPage {
    pub jobs: Vec<JobPosting>,
    pub total: i64,
}
