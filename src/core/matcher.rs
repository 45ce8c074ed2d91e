use thiserror::Error;
use crate::models::{CandidateProfile, JobPosting, MatchResult, ScoringWeights, SkillGap};
use crate::core::{
    scoring::{calculate_match_score, match_reasons, reasons_with_skills, score_with_skills, skill_set},
    skill_gap::analyze_skill_gaps,
};

/// Errors raised for job lists the caller should never have produced
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Malformed job at position {position}: {reason}")]
    MalformedJob { position: usize, reason: String },
}

/// Result of ranking a job pool for one candidate
#[derive(Debug)]
pub struct RankedMatches {
    pub matches: Vec<MatchResult>,
    /// Jobs with a positive score, counted before truncation
    pub total_matches: usize,
}

/// Scores, ranks and analyses open jobs for a candidate
///
/// Pure and synchronous: no I/O, no shared mutable state. Loading the
/// candidate and the open job pool is the caller's job.
#[derive(Debug, Clone)]
pub struct MatchScorer {
    weights: ScoringWeights,
}

impl MatchScorer {
    pub const DEFAULT_LIMIT: usize = 10;
    pub const DEFAULT_SAMPLE_SIZE: usize = 20;
    pub const DEFAULT_TOP_N: usize = 10;

    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Match score (0-100) of one job for one candidate
    pub fn score(&self, job: &JobPosting, candidate: &CandidateProfile) -> u8 {
        calculate_match_score(job, candidate, &self.weights)
    }

    /// Reasons one job matches one candidate
    pub fn reasons(&self, job: &JobPosting, candidate: &CandidateProfile) -> Vec<String> {
        match_reasons(job, candidate)
    }

    /// Rank open jobs for a candidate
    ///
    /// # Pipeline
    /// 1. Score every job
    /// 2. Drop jobs scoring 0
    /// 3. Stable sort by score, highest first (ties keep input order)
    /// 4. Truncate to `limit`
    pub fn rank_jobs(
        &self,
        candidate: &CandidateProfile,
        jobs: &[JobPosting],
        limit: usize,
    ) -> Result<RankedMatches, MatchError> {
        validate_jobs(jobs)?;

        let known = skill_set(&candidate.skills);

        let mut matches: Vec<MatchResult> = jobs
            .iter()
            .filter_map(|job| {
                let score = score_with_skills(job, candidate, &known, &self.weights);
                if score == 0 {
                    return None;
                }
                Some(MatchResult {
                    job_id: job.id,
                    score,
                    reasons: reasons_with_skills(job, candidate, &known),
                })
            })
            .collect();

        let total_matches = matches.len();

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(limit);

        tracing::debug!(
            "Ranked {} jobs for candidate {}: {} matches, returning {}",
            jobs.len(),
            candidate.user_id,
            total_matches,
            matches.len()
        );

        Ok(RankedMatches {
            matches,
            total_matches,
        })
    }

    /// Most requested skills the candidate is missing among the first `sample_size` jobs
    pub fn skill_gap(
        &self,
        candidate: &CandidateProfile,
        jobs: &[JobPosting],
        sample_size: usize,
        top_n: usize,
    ) -> Result<Vec<SkillGap>, MatchError> {
        let sampled = &jobs[..jobs.len().min(sample_size)];
        validate_jobs(sampled)?;

        Ok(analyze_skill_gaps(candidate, sampled, sample_size, top_n))
    }
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Reject entries missing their identifying fields
fn validate_jobs(jobs: &[JobPosting]) -> Result<(), MatchError> {
    for (position, job) in jobs.iter().enumerate() {
        if job.id <= 0 {
            return Err(MatchError::MalformedJob {
                position,
                reason: format!("invalid id {}", job.id),
            });
        }
        if job.title.trim().is_empty() {
            return Err(MatchError::MalformedJob {
                position,
                reason: format!("job {} has no title", job.id),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExperienceLevel;
    use crate::test_support::{create_test_candidate, create_test_job};

    #[test]
    fn test_rank_jobs_basic() {
        let scorer = MatchScorer::with_default_weights();
        let candidate = create_test_candidate(&["Python", "SQL"], 6.0, Some("Austin"));

        let jobs = vec![
            create_test_job(1, &["Python"], ExperienceLevel::Entry, None),          // 50
            create_test_job(2, &[], ExperienceLevel::Entry, None),                  // 0
            create_test_job(3, &["Python", "SQL", "AWS"], ExperienceLevel::Senior, Some("Austin")), // 73
        ];

        let result = scorer.rank_jobs(&candidate, &jobs, 10).unwrap();

        assert_eq!(result.total_matches, 2);
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].job_id, 3);
        assert_eq!(result.matches[0].score, 73);
        assert_eq!(result.matches[1].job_id, 1);
        assert_eq!(result.matches[1].score, 50);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let scorer = MatchScorer::with_default_weights();
        let candidate = create_test_candidate(&["Rust"], 3.0, None);

        let jobs: Vec<_> = (1..=5)
            .map(|i| create_test_job(i, &["Rust"], ExperienceLevel::Mid, None))
            .collect();

        let result = scorer.rank_jobs(&candidate, &jobs, 10).unwrap();
        let ids: Vec<i64> = result.matches.iter().map(|m| m.job_id).collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_respects_limit_but_reports_total() {
        let scorer = MatchScorer::with_default_weights();
        let candidate = create_test_candidate(&["Rust"], 3.0, None);

        let jobs: Vec<_> = (1..=25)
            .map(|i| create_test_job(i, &["Rust"], ExperienceLevel::Mid, None))
            .collect();

        let result = scorer.rank_jobs(&candidate, &jobs, MatchScorer::DEFAULT_LIMIT).unwrap();

        assert_eq!(result.matches.len(), 10);
        assert_eq!(result.total_matches, 25);
    }

    #[test]
    fn test_malformed_job_is_rejected() {
        let scorer = MatchScorer::with_default_weights();
        let candidate = create_test_candidate(&[], 3.0, None);

        let mut bad = create_test_job(2, &[], ExperienceLevel::Mid, None);
        bad.title = "   ".to_string();
        let jobs = vec![create_test_job(1, &[], ExperienceLevel::Mid, None), bad];

        let err = scorer.rank_jobs(&candidate, &jobs, 10).unwrap_err();
        assert!(matches!(err, MatchError::MalformedJob { position: 1, .. }));

        let zero_id = vec![create_test_job(0, &[], ExperienceLevel::Mid, None)];
        assert!(scorer.rank_jobs(&candidate, &zero_id, 10).is_err());
    }

    #[test]
    fn test_skill_gap_ignores_jobs_outside_sample() {
        let scorer = MatchScorer::with_default_weights();
        let candidate = create_test_candidate(&[], 3.0, None);

        let mut jobs = vec![create_test_job(1, &["Kotlin"], ExperienceLevel::Mid, None)];
        // Malformed entry beyond the sample is never inspected
        let mut late = create_test_job(2, &["Swift"], ExperienceLevel::Mid, None);
        late.title = String::new();
        jobs.push(late);

        let gaps = scorer.skill_gap(&candidate, &jobs, 1, 10).unwrap();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].name, "Kotlin");
    }

    #[test]
    fn test_score_is_deterministic() {
        let scorer = MatchScorer::default();
        let candidate = create_test_candidate(&["Python", "SQL"], 6.0, Some("Austin"));
        let job = create_test_job(1, &["Python", "SQL", "AWS"], ExperienceLevel::Senior, Some("Austin"));

        let first = scorer.score(&job, &candidate);
        for _ in 0..10 {
            assert_eq!(scorer.score(&job, &candidate), first);
            assert_eq!(scorer.reasons(&job, &candidate), scorer.reasons(&job, &candidate));
        }
    }
}
