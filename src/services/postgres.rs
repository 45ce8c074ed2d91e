use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgConnection, PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use crate::models::{
    CandidateProfile, CreateJobRequest, JobFilter, JobPage, JobPosting, JobStatus, UpdateProfileRequest,
    UserAccount, UserProfile,
};
use crate::services::repository::{CandidateRepository, JobRepository, RepositoryError};

const JOB_COLUMNS: &str = r#"
    id, employer_id, title, description, company_name, job_type, work_mode,
    experience_level, industry, category, city, state, country, allows_remote,
    salary_min, salary_max, salary_currency, salary_period, status, visibility,
    featured, urgent, views, applications_count, application_deadline,
    created_at, published_at
"#;

const OPEN_JOBS_CLAUSE: &str = "status = 'active' AND visibility = 'public'";

const OPEN_JOBS_ORDER: &str = "featured DESC, published_at DESC NULLS LAST, id DESC";

/// PostgreSQL-backed job board and candidate store
///
/// Runs the embedded migrations on connect. Required skills and candidate
/// skills are loaded with one extra query per call, not per row.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, RepositoryError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Fill in `required_skills` for a batch of jobs
    async fn attach_skills(&self, jobs: &mut [JobPosting]) -> Result<(), RepositoryError> {
        if jobs.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = jobs.iter().map(|j| j.id).collect();

        let query = r#"
            SELECT js.job_id, s.name
            FROM job_skills js
            JOIN skills s ON s.id = js.skill_id
            WHERE js.job_id = ANY($1)
            ORDER BY js.job_id, js.id
        "#;

        let rows = sqlx::query(query).bind(ids.as_slice()).fetch_all(&self.pool).await?;

        let mut by_job: HashMap<i64, Vec<String>> = HashMap::new();
        for row in &rows {
            let job_id: i64 = row.try_get("job_id")?;
            let name: String = row.try_get("name")?;
            by_job.entry(job_id).or_default().push(name);
        }

        for job in jobs.iter_mut() {
            job.required_skills = by_job.remove(&job.id).unwrap_or_default();
        }

        Ok(())
    }

    /// A user's skill names, in the order they were added
    async fn user_skills(&self, user_id: i64) -> Result<Vec<String>, RepositoryError> {
        let query = r#"
            SELECT s.name
            FROM user_skills us
            JOIN skills s ON s.id = us.skill_id
            WHERE us.user_id = $1
            ORDER BY us.id
        "#;

        let skills = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(|r| r.try_get::<String, _>("name"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(skills)
    }
}

/// Find or create a skill by name, returning its id. Unknown skills join the taxonomy.
async fn upsert_skill(conn: &mut PgConnection, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO skills (name, display_name)
        VALUES ($1, $1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(name)
    .fetch_one(conn)
    .await?
    .try_get("id")
}

#[async_trait]
impl JobRepository for PostgresClient {
    async fn open_jobs(&self, limit: Option<usize>) -> Result<Vec<JobPosting>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM jobs WHERE {} ORDER BY {} LIMIT $1",
            JOB_COLUMNS, OPEN_JOBS_CLAUSE, OPEN_JOBS_ORDER
        );

        // LIMIT NULL returns every row
        let rows = sqlx::query(&query)
            .bind(limit.map(|l| l as i64))
            .fetch_all(&self.pool)
            .await?;

        let mut jobs = rows.iter().map(job_from_row).collect::<Result<Vec<_>, _>>()?;
        self.attach_skills(&mut jobs).await?;

        tracing::debug!("Loaded {} open jobs", jobs.len());

        Ok(jobs)
    }

    async fn get_job(&self, job_id: i64) -> Result<Option<JobPosting>, RepositoryError> {
        let query = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);

        let row = sqlx::query(&query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let mut jobs = vec![job_from_row(&row)?];
                self.attach_skills(&mut jobs).await?;
                Ok(jobs.pop())
            }
            None => Ok(None),
        }
    }

    async fn increment_views(&self, job_id: i64) -> Result<i64, RepositoryError> {
        let query = r#"
            UPDATE jobs
            SET views = views + 1
            WHERE id = $1
            RETURNING views
        "#;

        let row = sqlx::query(query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Job {} not found", job_id)))?;

        Ok(row.try_get("views")?)
    }

    async fn list_jobs(
        &self,
        filter: &JobFilter,
        page: u32,
        per_page: u32,
    ) -> Result<JobPage, RepositoryError> {
        let mut count_query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) AS total FROM jobs WHERE ");
        count_query.push(OPEN_JOBS_CLAUSE);
        push_filters(&mut count_query, filter);

        let total: i64 = count_query
            .build()
            .fetch_one(&self.pool)
            .await?
            .try_get("total")?;

        let mut select: QueryBuilder<Postgres> = QueryBuilder::new(format!("SELECT {} FROM jobs WHERE ", JOB_COLUMNS));
        select.push(OPEN_JOBS_CLAUSE);
        push_filters(&mut select, filter);
        select.push(" ORDER BY ");
        select.push(OPEN_JOBS_ORDER);
        select.push(" LIMIT ");
        select.push_bind(i64::from(per_page));
        select.push(" OFFSET ");
        select.push_bind(i64::from(page.saturating_sub(1)) * i64::from(per_page));

        let rows = select.build().fetch_all(&self.pool).await?;

        let mut jobs = rows.iter().map(job_from_row).collect::<Result<Vec<_>, _>>()?;
        self.attach_skills(&mut jobs).await?;

        Ok(JobPage { jobs, total })
    }

    async fn create_job(
        &self,
        employer_id: i64,
        company_name: &str,
        job: &CreateJobRequest,
    ) -> Result<JobPosting, RepositoryError> {
        let published_at = (job.status == JobStatus::Active).then(Utc::now);

        let mut tx = self.pool.begin().await?;

        let insert = r#"
            INSERT INTO jobs (
                employer_id, title, description, company_name, job_type, work_mode,
                experience_level, industry, category, city, state, country, allows_remote,
                salary_min, salary_max, salary_currency, salary_period, status, published_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING id
        "#;

        let job_id: i64 = sqlx::query(insert)
            .bind(employer_id)
            .bind(&job.title)
            .bind(&job.description)
            .bind(company_name)
            .bind(&job.job_type)
            .bind(job.work_mode)
            .bind(job.experience_level)
            .bind(&job.industry)
            .bind(&job.category)
            .bind(&job.city)
            .bind(&job.state)
            .bind(&job.country)
            .bind(job.allows_remote)
            .bind(job.salary_min)
            .bind(job.salary_max)
            .bind(&job.salary_currency)
            .bind(&job.salary_period)
            .bind(job.status)
            .bind(published_at)
            .fetch_one(&mut *tx)
            .await?
            .try_get("id")?;

        let mut seen = HashSet::new();
        for name in job.required_skills.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            if !seen.insert(name) {
                continue;
            }

            let skill_id = upsert_skill(&mut tx, name).await?;

            sqlx::query(
                r#"
                INSERT INTO job_skills (job_id, skill_id)
                VALUES ($1, $2)
                ON CONFLICT (job_id, skill_id) DO NOTHING
                "#,
            )
            .bind(job_id)
            .bind(skill_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!("Created job {} for employer {}", job_id, employer_id);

        self.get_job(job_id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Job {} vanished after insert", job_id)))
    }

    async fn skill_display_names(&self, names: &[String]) -> Result<HashMap<String, String>, RepositoryError> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }

        let query = r#"
            SELECT name, NULLIF(display_name, '') AS display_name
            FROM skills
            WHERE name = ANY($1)
        "#;

        let rows = sqlx::query(query).bind(names).fetch_all(&self.pool).await?;

        let mut display = HashMap::with_capacity(rows.len());
        for row in &rows {
            let name: String = row.try_get("name")?;
            if let Some(label) = row.try_get::<Option<String>, _>("display_name")? {
                display.insert(name, label);
            }
        }

        Ok(display)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, RepositoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl CandidateRepository for PostgresClient {
    async fn get_account(&self, user_id: i64) -> Result<Option<UserAccount>, RepositoryError> {
        let query = r#"
            SELECT id, role, company_name, is_active
            FROM users
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| -> Result<UserAccount, RepositoryError> {
            Ok(UserAccount {
                id: row.try_get("id")?,
                role: row.try_get("role")?,
                company_name: row.try_get("company_name")?,
                is_active: row.try_get("is_active")?,
            })
        })
        .transpose()
    }

    async fn get_candidate(&self, user_id: i64) -> Result<Option<CandidateProfile>, RepositoryError> {
        let query = r#"
            SELECT id, city, years_of_experience, expected_salary_min
            FROM users
            WHERE id = $1
        "#;

        let Some(row) = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let skills = self.user_skills(user_id).await?;

        let years: Option<f64> = row.try_get("years_of_experience")?;

        tracing::debug!("User {} has {} skills", user_id, skills.len());

        Ok(Some(CandidateProfile {
            user_id: row.try_get("id")?,
            city: row.try_get("city")?,
            years_of_experience: years.unwrap_or(0.0),
            expected_salary_min: row.try_get("expected_salary_min")?,
            skills,
        }))
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<UserProfile>, RepositoryError> {
        let query = r#"
            SELECT id, email, role, first_name, last_name, phone, bio, city, state, country,
                   years_of_experience, expected_salary_min, current_job_title, company_name,
                   is_active, created_at
            FROM users
            WHERE id = $1
        "#;

        let Some(row) = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let skills = self.user_skills(user_id).await?;

        Ok(Some(UserProfile {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            role: row.try_get("role")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            phone: row.try_get("phone")?,
            bio: row.try_get("bio")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            country: row.try_get("country")?,
            years_of_experience: row.try_get("years_of_experience")?,
            expected_salary_min: row.try_get("expected_salary_min")?,
            current_job_title: row.try_get("current_job_title")?,
            company_name: row.try_get("company_name")?,
            is_active: row.try_get("is_active")?,
            skills,
            created_at: row.try_get("created_at")?,
        }))
    }

    async fn update_profile(
        &self,
        user_id: i64,
        update: &UpdateProfileRequest,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let query = r#"
            UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                bio = COALESCE($5, bio),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                country = COALESCE($8, country),
                years_of_experience = COALESCE($9, years_of_experience),
                expected_salary_min = COALESCE($10, expected_salary_min),
                current_job_title = COALESCE($11, current_job_title),
                company_name = COALESCE($12, company_name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
        "#;

        let updated = sqlx::query(query)
            .bind(user_id)
            .bind(&update.first_name)
            .bind(&update.last_name)
            .bind(&update.phone)
            .bind(&update.bio)
            .bind(&update.city)
            .bind(&update.state)
            .bind(&update.country)
            .bind(update.years_of_experience)
            .bind(update.expected_salary_min)
            .bind(&update.current_job_title)
            .bind(&update.company_name)
            .fetch_optional(&mut *tx)
            .await?;

        // Dropping the transaction rolls it back
        if updated.is_none() {
            return Ok(None);
        }

        if let Some(names) = update.skill_names() {
            sqlx::query("DELETE FROM user_skills WHERE user_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

            for name in &names {
                let skill_id = upsert_skill(&mut tx, name).await?;

                sqlx::query("INSERT INTO user_skills (user_id, skill_id) VALUES ($1, $2)")
                    .bind(user_id)
                    .bind(skill_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        tracing::info!("Updated profile for user {}", user_id);

        self.get_user(user_id).await
    }
}

fn job_from_row(row: &PgRow) -> Result<JobPosting, sqlx::Error> {
    Ok(JobPosting {
        id: row.try_get("id")?,
        employer_id: row.try_get("employer_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        company_name: row.try_get("company_name")?,
        job_type: row.try_get("job_type")?,
        work_mode: row.try_get("work_mode")?,
        experience_level: row.try_get("experience_level")?,
        industry: row.try_get("industry")?,
        category: row.try_get("category")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        country: row.try_get("country")?,
        allows_remote: row.try_get("allows_remote")?,
        salary_min: row.try_get("salary_min")?,
        salary_max: row.try_get("salary_max")?,
        salary_currency: row.try_get("salary_currency")?,
        salary_period: row.try_get("salary_period")?,
        status: row.try_get("status")?,
        visibility: row.try_get("visibility")?,
        featured: row.try_get("featured")?,
        urgent: row.try_get("urgent")?,
        views: row.try_get("views")?,
        applications_count: row.try_get("applications_count")?,
        required_skills: Vec::new(),
        application_deadline: row.try_get("application_deadline")?,
        created_at: row.try_get("created_at")?,
        published_at: row.try_get("published_at")?,
    })
}

/// Append listing filters as `AND ...` clauses
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        builder.push(" AND (title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR company_name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR description ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
    if let Some(job_type) = &filter.job_type {
        builder.push(" AND job_type = ");
        builder.push_bind(job_type.clone());
    }
    if let Some(work_mode) = filter.work_mode {
        builder.push(" AND work_mode = ");
        builder.push_bind(work_mode);
    }
    if let Some(level) = filter.experience_level {
        builder.push(" AND experience_level = ");
        builder.push_bind(level);
    }
    if let Some(city) = &filter.city {
        builder.push(" AND city ILIKE ");
        builder.push_bind(like_pattern(city));
    }
}

/// Substring pattern for ILIKE with wildcards in the input escaped
fn like_pattern(raw: &str) -> String {
    let escaped = raw
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
