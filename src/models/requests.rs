use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{ExperienceLevel, JobFilter, JobStatus, WorkMode};

/// Query for the job recommendation endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchJobsQuery {
    pub limit: Option<usize>,
}

/// Query for the job board listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListJobsQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub work_mode: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for ListJobsQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
            search: None,
            job_type: None,
            work_mode: None,
            experience_level: None,
            city: None,
        }
    }
}

impl ListJobsQuery {
    pub const MAX_PER_PAGE: u32 = 100;

    /// Page number, never below 1
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Page size clamped to 1..=MAX_PER_PAGE
    pub fn per_page(&self) -> u32 {
        self.per_page.clamp(1, Self::MAX_PER_PAGE)
    }

    /// Build the listing filter. Blank parameters are ignored.
    pub fn filter(&self) -> Result<JobFilter, String> {
        let work_mode = match non_blank(&self.work_mode) {
            Some(mode) => Some(mode.parse::<WorkMode>()?),
            None => None,
        };
        let experience_level = match non_blank(&self.experience_level) {
            Some(level) => Some(level.parse::<ExperienceLevel>()?),
            None => None,
        };

        Ok(JobFilter {
            search: non_blank(&self.search).map(str::to_string),
            job_type: non_blank(&self.job_type).map(str::to_string),
            work_mode,
            experience_level,
            city: non_blank(&self.city).map(str::to_string),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Request to publish a new job posting
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_salary_range"))]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 50))]
    pub job_type: String,
    #[serde(default)]
    pub work_mode: WorkMode,
    pub experience_level: ExperienceLevel,
    #[validate(length(min = 1, max = 100))]
    pub industry: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[serde(default)]
    pub allows_remote: bool,
    #[validate(range(min = 0))]
    pub salary_min: Option<i64>,
    #[validate(range(min = 0))]
    pub salary_max: Option<i64>,
    #[serde(default = "default_currency")]
    #[validate(length(min = 3, max = 10))]
    pub salary_currency: String,
    #[serde(default = "default_period")]
    #[validate(length(min = 1, max = 20))]
    pub salary_period: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_period() -> String {
    "year".to_string()
}

fn validate_salary_range(req: &CreateJobRequest) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (req.salary_min, req.salary_max) {
        if min > max {
            let mut err = ValidationError::new("salary_range");
            err.message = Some("salary_min must not exceed salary_max".into());
            return Err(err);
        }
    }
    Ok(())
}

/// Partial update of the caller's profile. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub bio: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(range(min = 0.0, max = 80.0))]
    pub years_of_experience: Option<f64>,
    #[validate(range(min = 0))]
    pub expected_salary_min: Option<i64>,
    #[validate(length(max = 200))]
    pub current_job_title: Option<String>,
    #[validate(length(max = 200))]
    pub company_name: Option<String>,
    /// Replaces the whole skill list when present
    pub skills: Option<Vec<String>>,
}

impl UpdateProfileRequest {
    /// Trimmed, non-empty skill names without repeats, in request order
    pub fn skill_names(&self) -> Option<Vec<String>> {
        self.skills.as_ref().map(|skills| {
            let mut names: Vec<String> = Vec::with_capacity(skills.len());
            for name in skills.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
            names
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateJobRequest {
        serde_json::from_value(serde_json::json!({
            "title": "Backend Engineer",
            "description": "Build APIs",
            "job_type": "full-time",
            "experience_level": "mid",
            "industry": "Technology",
            "category": "Software Development",
            "city": "Austin",
            "country": "United States",
            "salary_min": 90000,
            "salary_max": 120000,
            "required_skills": ["Rust", "SQL"]
        }))
        .unwrap()
    }

    #[test]
    fn test_create_request_defaults() {
        let req = create_request();
        assert_eq!(req.work_mode, WorkMode::Onsite);
        assert_eq!(req.status, JobStatus::Draft);
        assert_eq!(req.salary_currency, "USD");
        assert_eq!(req.salary_period, "year");
        assert!(!req.allows_remote);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_inverted_salary() {
        let mut req = create_request();
        req.salary_min = Some(150000);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_empty_title() {
        let mut req = create_request();
        req.title = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_profile_update_skill_names() {
        let req: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "city": "Austin",
            "skills": ["Rust", " SQL ", "", "Rust"]
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert!(req.first_name.is_none());
        assert_eq!(req.skill_names(), Some(vec!["Rust".to_string(), "SQL".to_string()]));
        assert_eq!(UpdateProfileRequest::default().skill_names(), None);
    }

    #[test]
    fn test_profile_update_rejects_negative_experience() {
        let req = UpdateProfileRequest {
            years_of_experience: Some(-1.0),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_list_query_clamps_paging() {
        let query = ListJobsQuery {
            page: 0,
            per_page: 500,
            ..Default::default()
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 100);
    }

    #[test]
    fn test_list_query_filter_ignores_blanks() {
        let query = ListJobsQuery {
            search: Some("  ".to_string()),
            work_mode: Some(String::new()),
            experience_level: Some("Senior".to_string()),
            city: Some("Austin".to_string()),
            ..Default::default()
        };
        let filter = query.filter().unwrap();
        assert!(filter.search.is_none());
        assert!(filter.work_mode.is_none());
        assert_eq!(filter.experience_level, Some(ExperienceLevel::Senior));
        assert_eq!(filter.city.as_deref(), Some("Austin"));
    }

    #[test]
    fn test_list_query_filter_rejects_unknown_mode() {
        let query = ListJobsQuery {
            work_mode: Some("underwater".to_string()),
            ..Default::default()
        };
        assert!(query.filter().is_err());
    }
}
