use std::collections::HashMap;
use crate::models::{CandidateProfile, JobPosting, SkillGap};
use crate::core::scoring::skill_set;

/// Rank the required skills a candidate is missing across a sample of open jobs
///
/// Only the first `sample_size` jobs are scanned. Every required skill the
/// candidate lacks counts once per job that lists it, and the job's title is
/// recorded against it. Results are ordered by count, highest first; equal
/// counts keep the order in which the skills were first seen.
pub fn analyze_skill_gaps(
    candidate: &CandidateProfile,
    jobs: &[JobPosting],
    sample_size: usize,
    top_n: usize,
) -> Vec<SkillGap> {
    let known = skill_set(&candidate.skills);

    let mut gaps: Vec<SkillGap> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for job in jobs.iter().take(sample_size) {
        for skill in &job.required_skills {
            if known.contains(skill.as_str()) {
                continue;
            }

            let slot = *index.entry(skill.as_str()).or_insert_with(|| {
                gaps.push(SkillGap {
                    name: skill.clone(),
                    count: 0,
                    jobs: Vec::new(),
                });
                gaps.len() - 1
            });

            let gap = &mut gaps[slot];
            gap.count += 1;
            gap.jobs.push(job.title.clone());
        }
    }

    // Stable sort keeps first-seen order among equal counts
    gaps.sort_by(|a, b| b.count.cmp(&a.count));
    gaps.truncate(top_n);
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExperienceLevel;
    use crate::test_support::{create_test_candidate, create_test_job};

    #[test]
    fn test_counts_missing_skills() {
        let candidate = create_test_candidate(&["Python"], 3.0, None);
        let mut a = create_test_job(1, &["Python", "AWS", "Docker"], ExperienceLevel::Mid, None);
        a.title = "Backend".to_string();
        let mut b = create_test_job(2, &["Docker", "Kubernetes"], ExperienceLevel::Mid, None);
        b.title = "Platform".to_string();

        let gaps = analyze_skill_gaps(&candidate, &[a, b], 20, 10);

        assert_eq!(gaps.len(), 3);
        assert_eq!(gaps[0].name, "Docker");
        assert_eq!(gaps[0].count, 2);
        assert_eq!(gaps[0].jobs, vec!["Backend".to_string(), "Platform".to_string()]);
        // Ties keep first-seen order
        assert_eq!(gaps[1].name, "AWS");
        assert_eq!(gaps[2].name, "Kubernetes");
    }

    #[test]
    fn test_never_reports_known_skill() {
        let candidate = create_test_candidate(&["Go", "SQL"], 3.0, None);
        let jobs = vec![
            create_test_job(1, &["Go", "SQL"], ExperienceLevel::Mid, None),
            create_test_job(2, &["SQL", "Terraform"], ExperienceLevel::Mid, None),
        ];

        let gaps = analyze_skill_gaps(&candidate, &jobs, 20, 10);

        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].name, "Terraform");
        assert!(gaps.iter().all(|g| !candidate.skills.contains(&g.name)));
    }

    #[test]
    fn test_only_samples_first_jobs() {
        let candidate = create_test_candidate(&[], 3.0, None);
        let mut jobs: Vec<JobPosting> = (1..=20)
            .map(|i| create_test_job(i, &["Common"], ExperienceLevel::Mid, None))
            .collect();
        jobs.extend((21..=25).map(|i| create_test_job(i, &["LateOnly"], ExperienceLevel::Mid, None)));

        let gaps = analyze_skill_gaps(&candidate, &jobs, 20, 10);

        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].name, "Common");
        assert_eq!(gaps[0].count, 20);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let candidate = create_test_candidate(&[], 3.0, None);
        let jobs = vec![create_test_job(1, &["A", "B", "C", "D"], ExperienceLevel::Mid, None)];

        let gaps = analyze_skill_gaps(&candidate, &jobs, 20, 2);

        assert_eq!(gaps.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
