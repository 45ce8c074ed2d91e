// Criterion benchmarks for Hire Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hire_match::core::{scoring::calculate_match_score, MatchScorer};
use hire_match::models::{
    CandidateProfile, ExperienceLevel, JobPosting, JobStatus, ScoringWeights, Visibility, WorkMode,
};
use chrono::Utc;

const SKILL_POOL: [&str; 12] = [
    "Rust", "Go", "Python", "SQL", "Docker", "Kubernetes", "AWS", "Terraform", "React", "TypeScript",
    "Kafka", "Redis",
];

const LEVELS: [ExperienceLevel; 5] = [
    ExperienceLevel::Entry,
    ExperienceLevel::Junior,
    ExperienceLevel::Mid,
    ExperienceLevel::Senior,
    ExperienceLevel::Lead,
];

fn create_job(id: usize) -> JobPosting {
    let required_skills = (0..4)
        .map(|k| SKILL_POOL[(id * 3 + k) % SKILL_POOL.len()].to_string())
        .collect();

    JobPosting {
        id: id as i64 + 1,
        employer_id: 1,
        title: format!("Job {}", id),
        description: "Benchmark posting".to_string(),
        company_name: "Acme".to_string(),
        job_type: "full-time".to_string(),
        work_mode: if id % 4 == 0 { WorkMode::Remote } else { WorkMode::Onsite },
        experience_level: LEVELS[id % LEVELS.len()],
        industry: "Technology".to_string(),
        category: "Engineering".to_string(),
        city: Some(if id % 3 == 0 { "Austin" } else { "Boston" }.to_string()),
        state: None,
        country: "United States".to_string(),
        allows_remote: id % 5 == 0,
        salary_min: Some(60_000 + (id as i64 % 10) * 10_000),
        salary_max: None,
        salary_currency: "USD".to_string(),
        salary_period: "year".to_string(),
        status: JobStatus::Active,
        visibility: Visibility::Public,
        featured: false,
        urgent: false,
        views: 0,
        applications_count: 0,
        required_skills,
        application_deadline: None,
        created_at: Utc::now(),
        published_at: Some(Utc::now()),
    }
}

fn create_candidate() -> CandidateProfile {
    CandidateProfile {
        user_id: 1,
        city: Some("austin".to_string()),
        years_of_experience: 4.0,
        expected_salary_min: Some(90_000),
        skills: vec!["Rust".to_string(), "SQL".to_string(), "Docker".to_string(), "AWS".to_string()],
    }
}

fn bench_single_score(c: &mut Criterion) {
    let candidate = create_candidate();
    let job = create_job(3);
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(&job), black_box(&candidate), black_box(&weights)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let scorer = MatchScorer::with_default_weights();
    let candidate = create_candidate();

    let mut group = c.benchmark_group("ranking");

    for job_count in [10, 100, 1000, 5000].iter() {
        let jobs: Vec<JobPosting> = (0..*job_count).map(create_job).collect();

        group.bench_with_input(BenchmarkId::new("rank_jobs", job_count), job_count, |b, _| {
            b.iter(|| scorer.rank_jobs(black_box(&candidate), black_box(&jobs), black_box(10)));
        });
    }

    group.finish();
}

fn bench_skill_gap(c: &mut Criterion) {
    let scorer = MatchScorer::with_default_weights();
    let candidate = create_candidate();
    let jobs: Vec<JobPosting> = (0..100).map(create_job).collect();

    c.bench_function("skill_gap_20_of_100", |b| {
        b.iter(|| scorer.skill_gap(black_box(&candidate), black_box(&jobs), 20, 10));
    });
}

criterion_group!(benches, bench_single_score, bench_ranking, bench_skill_gap);

criterion_main!(benches);
