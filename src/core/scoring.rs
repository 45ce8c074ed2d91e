use std::collections::HashSet;
use crate::models::{CandidateProfile, JobPosting, ScoringWeights};
use crate::core::experience::matches_experience;

/// Most matching skills named in a reason before summarising the rest
const REASON_SKILL_PREVIEW: usize = 3;

/// Build a lookup set over a candidate's skill names
#[inline]
pub fn skill_set(skills: &[String]) -> HashSet<&str> {
    skills.iter().map(String::as_str).collect()
}

/// Required skills of a job the candidate has, in the job's order, without repeats
pub fn matching_skills<'a>(job: &'a JobPosting, candidate_skills: &HashSet<&str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    job.required_skills
        .iter()
        .map(String::as_str)
        .filter(|skill| candidate_skills.contains(skill) && seen.insert(*skill))
        .collect()
}

/// Calculate a match score (0-100) for a job against a candidate
///
/// Scoring formula (default weights):
/// score = min(100,
///     30 if the job level is in the candidate's experience window
///   + floor(50 * matched_skills / required_skills)   # 0 when nothing is required
///   + 10 if both cities are set and equal ignoring case
///   + 10 if the job allows remote work or is remote
/// )
pub fn calculate_match_score(
    job: &JobPosting,
    candidate: &CandidateProfile,
    weights: &ScoringWeights,
) -> u8 {
    score_with_skills(job, candidate, &skill_set(&candidate.skills), weights)
}

/// Same as [`calculate_match_score`] with a prebuilt skill set, for batch scoring
pub fn score_with_skills(
    job: &JobPosting,
    candidate: &CandidateProfile,
    candidate_skills: &HashSet<&str>,
    weights: &ScoringWeights,
) -> u8 {
    // Saturating so any configured weights still clamp to 100
    let mut score: u32 = 0;

    if matches_experience(candidate.years_of_experience, job.experience_level) {
        score = score.saturating_add(weights.experience);
    }

    score = score.saturating_add(skills_score(job, candidate_skills, weights.skills));

    if same_city(candidate, job) {
        score = score.saturating_add(weights.location);
    }

    if job.offers_remote() {
        score = score.saturating_add(weights.remote);
    }

    score.min(100) as u8
}

/// Proportional skill contribution, floored to an integer
#[inline]
fn skills_score(job: &JobPosting, candidate_skills: &HashSet<&str>, weight: u32) -> u32 {
    let required = job.required_skills.len() as u64;
    if required == 0 {
        return 0;
    }

    let matched = matching_skills(job, candidate_skills).len() as u64;
    let points = u64::from(weight) * matched / required;
    u32::try_from(points).unwrap_or(u32::MAX)
}

#[inline]
fn same_city(candidate: &CandidateProfile, job: &JobPosting) -> bool {
    match (candidate.home_city(), job.job_city()) {
        (Some(home), Some(city)) => home.to_lowercase() == city.to_lowercase(),
        _ => false,
    }
}

/// Human-readable reasons a job matches, in fixed order:
/// skills, location, remote work, salary.
///
/// The experience criterion adds to the score but has no reason string.
pub fn match_reasons(job: &JobPosting, candidate: &CandidateProfile) -> Vec<String> {
    reasons_with_skills(job, candidate, &skill_set(&candidate.skills))
}

/// Same as [`match_reasons`] with a prebuilt skill set
pub fn reasons_with_skills(
    job: &JobPosting,
    candidate: &CandidateProfile,
    candidate_skills: &HashSet<&str>,
) -> Vec<String> {
    let mut reasons = Vec::new();

    let matched = matching_skills(job, candidate_skills);
    if !matched.is_empty() {
        let mut listed = matched
            .iter()
            .take(REASON_SKILL_PREVIEW)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        if matched.len() > REASON_SKILL_PREVIEW {
            listed.push_str(&format!(" and {} more", matched.len() - REASON_SKILL_PREVIEW));
        }
        reasons.push(format!("Matches your skills: {}", listed));
    }

    if same_city(candidate, job) {
        if let Some(city) = job.job_city() {
            reasons.push(format!("Located in your city: {}", city));
        }
    }

    if job.offers_remote() {
        reasons.push("Offers remote work".to_string());
    }

    if let (Some(expected), Some(offered)) = (candidate.expected_salary_min, job.declared_salary_min()) {
        if offered >= expected {
            reasons.push("Salary meets your expectations".to_string());
        }
    }

    reasons
}
