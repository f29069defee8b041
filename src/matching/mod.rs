// src/matching/mod.rs
//! Job matching engine - scores a static job catalog against user
//! preferences and the AI-derived resume profile.

pub mod salary;

use crate::analysis::ResumeAnalysis;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use salary::check_salary_match;

const TITLE_POINTS: u32 = 3;
const SKILL_POINTS: u32 = 2;
const LOCATION_POINTS: u32 = 2;
const SALARY_POINTS: u32 = 1;

/// Ranked results are cut off after this many jobs.
const MAX_MATCHES: usize = 10;

/// A posting from the static job catalog. Fields the matcher does not
/// interpret (company, posting id, ...) ride along in `extra` and are
/// serialized back out untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// User-supplied matching preferences, validated by the preference
/// write path before they reach the matcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub preferred_role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary_range: Option<SalaryRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: i64,
    pub max: i64,
}

/// A catalog job annotated with its score and the human-readable
/// reasons behind it, in rule evaluation order.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedJob {
    #[serde(flatten)]
    pub job: Job,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

/// Score every job in the catalog and return the top matches, sorted by
/// descending score. The sort is stable, so equal-scored jobs keep their
/// catalog order.
pub fn match_jobs(
    jobs: &[Job],
    preferences: &UserPreferences,
    analysis: &ResumeAnalysis,
) -> Vec<MatchedJob> {
    let mut matched: Vec<MatchedJob> = jobs
        .iter()
        .map(|job| score_job(job, preferences, analysis))
        .collect();

    matched.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matched.truncate(MAX_MATCHES);
    matched
}

/// Apply the scoring rules to a single job. Contributions accumulate
/// additively; reasons are appended in the order the rules run
/// (title, skills, location, salary).
fn score_job(job: &Job, preferences: &UserPreferences, analysis: &ResumeAnalysis) -> MatchedJob {
    let mut score = 0u32;
    let mut reasons = Vec::new();

    // Title matching - the preferred-role rule wins over the
    // AI-suggested one, at most one of the two fires.
    let job_title = job.title.to_lowercase();
    let preferred_role = preferences.preferred_role.to_lowercase();
    let suggested_title = analysis.suggested_title.to_lowercase();

    if !preferred_role.is_empty() && job_title.contains(&preferred_role) {
        score += TITLE_POINTS;
        reasons.push("Title matches preferred role".to_string());
    } else if !suggested_title.is_empty() && job_title.contains(&suggested_title) {
        score += TITLE_POINTS;
        reasons.push("Title matches AI-suggested role".to_string());
    }

    // Skills matching, one contribution per matched skill, no cap
    let job_text = format!(
        "{} {}",
        job.description.to_lowercase(),
        job.requirements.to_lowercase()
    );
    for skill in &analysis.skills {
        if !skill.is_empty() && job_text.contains(&skill.to_lowercase()) {
            score += SKILL_POINTS;
            reasons.push(format!("Skill match: {}", skill));
        }
    }

    // Location matching, with "remote" matching on either side
    let job_location = job.location.to_lowercase();
    let preferred_location = preferences.location.to_lowercase();

    if !preferred_location.is_empty()
        && (job_location.contains(&preferred_location)
            || job_location == "remote"
            || preferred_location == "remote")
    {
        score += LOCATION_POINTS;
        reasons.push("Location match".to_string());
    }

    // Salary matching - no evidence in the free-text salary field means
    // no point, never a penalty
    if let Some(range) = preferences.salary_range {
        if check_salary_match(&job.salary, range.min, range.max) {
            score += SALARY_POINTS;
            reasons.push("Salary in range".to_string());
        }
    }

    MatchedJob {
        job: job.clone(),
        match_score: score,
        match_reasons: reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Seniority;

    fn job(title: &str, description: &str, requirements: &str, location: &str, salary: &str) -> Job {
        Job {
            title: title.to_string(),
            description: description.to_string(),
            requirements: requirements.to_string(),
            location: location.to_string(),
            salary: salary.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    fn analysis(skills: &[&str], suggested_title: &str) -> ResumeAnalysis {
        ResumeAnalysis {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            suggested_title: suggested_title.to_string(),
            seniority: Seniority::Mid,
            summary: "Summary".to_string(),
        }
    }

    #[test]
    fn test_empty_catalog_matches_nothing() {
        let matches = match_jobs(&[], &UserPreferences::default(), &analysis(&[], ""));
        assert!(matches.is_empty());
    }

    #[test]
    fn test_title_rules_are_mutually_exclusive() {
        let jobs = vec![job("Senior Backend Engineer", "", "", "", "")];
        let preferences = UserPreferences {
            preferred_role: "Backend Engineer".to_string(),
            ..Default::default()
        };
        let matches = match_jobs(&jobs, &preferences, &analysis(&[], "Data Scientist"));

        assert_eq!(matches[0].match_score, 3);
        assert_eq!(
            matches[0].match_reasons,
            vec!["Title matches preferred role".to_string()]
        );
    }

    #[test]
    fn test_ai_suggested_title_fires_without_preferred_role() {
        let jobs = vec![job("Lead Data Scientist", "", "", "", "")];
        let matches = match_jobs(
            &jobs,
            &UserPreferences::default(),
            &analysis(&[], "Data Scientist"),
        );

        assert_eq!(matches[0].match_score, 3);
        assert_eq!(
            matches[0].match_reasons,
            vec!["Title matches AI-suggested role".to_string()]
        );
    }

    #[test]
    fn test_skill_matches_score_per_matched_skill() {
        let jobs = vec![job(
            "Engineer",
            "We use Python for data pipelines",
            "",
            "",
            "",
        )];
        let matches = match_jobs(
            &jobs,
            &UserPreferences::default(),
            &analysis(&["Python", "SQL"], ""),
        );

        assert_eq!(matches[0].match_score, 2);
        assert_eq!(
            matches[0].match_reasons,
            vec!["Skill match: Python".to_string()]
        );
    }

    #[test]
    fn test_skill_matching_searches_requirements_too() {
        let jobs = vec![job("Engineer", "", "3+ years of SQL", "", "")];
        let matches = match_jobs(
            &jobs,
            &UserPreferences::default(),
            &analysis(&["Python", "SQL"], ""),
        );

        assert_eq!(matches[0].match_score, 2);
        assert_eq!(
            matches[0].match_reasons,
            vec!["Skill match: SQL".to_string()]
        );
    }

    #[test]
    fn test_remote_location_matches_either_side() {
        let preferences = UserPreferences {
            location: "Berlin".to_string(),
            ..Default::default()
        };
        let remote_job = vec![job("Engineer", "", "", "Remote", "")];
        let matches = match_jobs(&remote_job, &preferences, &analysis(&[], ""));
        assert_eq!(matches[0].match_score, 2);

        let remote_preference = UserPreferences {
            location: "remote".to_string(),
            ..Default::default()
        };
        let office_job = vec![job("Engineer", "", "", "Munich office", "")];
        let matches = match_jobs(&office_job, &remote_preference, &analysis(&[], ""));
        assert_eq!(matches[0].match_score, 2);
        assert_eq!(matches[0].match_reasons, vec!["Location match".to_string()]);
    }

    #[test]
    fn test_empty_preferred_location_never_matches() {
        let jobs = vec![job("Engineer", "", "", "Remote", "")];
        let matches = match_jobs(&jobs, &UserPreferences::default(), &analysis(&[], ""));
        assert_eq!(matches[0].match_score, 0);
    }

    #[test]
    fn test_reason_order_follows_rule_order() {
        let jobs = vec![job(
            "Backend Engineer",
            "Python and SQL heavy role",
            "",
            "Remote",
            "$70,000 - $90,000",
        )];
        let preferences = UserPreferences {
            preferred_role: "Backend Engineer".to_string(),
            location: "remote".to_string(),
            salary_range: Some(SalaryRange {
                min: 80_000,
                max: 100_000,
            }),
        };
        let matches = match_jobs(&jobs, &preferences, &analysis(&["Python", "SQL"], ""));

        assert_eq!(matches[0].match_score, 3 + 2 + 2 + 2 + 1);
        assert_eq!(
            matches[0].match_reasons,
            vec![
                "Title matches preferred role".to_string(),
                "Skill match: Python".to_string(),
                "Skill match: SQL".to_string(),
                "Location match".to_string(),
                "Salary in range".to_string(),
            ]
        );
    }

    #[test]
    fn test_results_are_ranked_and_truncated_to_ten() {
        // 15 jobs with distinct scores: job N matches N skills
        let skills: Vec<String> = (0..15).map(|i| format!("skill{:02}", i)).collect();
        let skill_refs: Vec<&str> = skills.iter().map(|s| s.as_str()).collect();
        let jobs: Vec<Job> = (1..=15)
            .map(|n| {
                let description = skills[..n].join(" ");
                job(&format!("Job {}", n), &description, "", "", "")
            })
            .collect();

        let matches = match_jobs(
            &jobs,
            &UserPreferences::default(),
            &analysis(&skill_refs, ""),
        );

        assert_eq!(matches.len(), 10);
        assert_eq!(matches[0].job.title, "Job 15");
        assert_eq!(matches[0].match_score, 30);
        assert_eq!(matches[9].job.title, "Job 6");
        let scores: Vec<u32> = matches.iter().map(|m| m.match_score).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
    }

    #[test]
    fn test_tied_scores_keep_catalog_order() {
        let jobs = vec![
            job("First", "", "", "", ""),
            job("Second", "", "", "", ""),
            job("Third", "", "", "", ""),
        ];
        let matches = match_jobs(&jobs, &UserPreferences::default(), &analysis(&[], ""));
        let titles: Vec<&str> = matches.iter().map(|m| m.job.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_matching_is_deterministic() {
        let jobs = vec![
            job("Backend Engineer", "Python", "", "Remote", "$90,000"),
            job("Data Scientist", "SQL", "", "Berlin", "$80,000"),
        ];
        let preferences = UserPreferences {
            preferred_role: "Engineer".to_string(),
            location: "Berlin".to_string(),
            salary_range: Some(SalaryRange {
                min: 70_000,
                max: 95_000,
            }),
        };
        let profile = analysis(&["Python", "SQL"], "Data Scientist");

        let first = match_jobs(&jobs, &preferences, &profile);
        let second = match_jobs(&jobs, &preferences, &profile);

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn test_passthrough_fields_survive_matching() {
        let raw = serde_json::json!({
            "id": 7,
            "title": "Engineer",
            "company": "Acme",
            "description": "",
            "requirements": "",
            "location": "",
            "salary": ""
        });
        let jobs = vec![serde_json::from_value::<Job>(raw).unwrap()];
        let matches = match_jobs(&jobs, &UserPreferences::default(), &analysis(&[], ""));

        let out = serde_json::to_value(&matches[0]).unwrap();
        assert_eq!(out["company"], "Acme");
        assert_eq!(out["id"], 7);
        assert_eq!(out["matchScore"], 0);
    }
}
