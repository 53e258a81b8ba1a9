//! Skill Match Scorer: compares detected resume skills against detected
//! job-description skills and produces per-category and overall fit scores
//! plus flattened matched/missing skill lists for display.

use serde::{Deserialize, Serialize};

use crate::matching::taxonomy::{SkillProfile, SkillTaxonomy};

/// Points awarded per job-description skill.
const POINTS_PER_SKILL: f64 = 10.0;

/// Matched or missing skills for one category present in the JD profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMatch {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    /// Percentage in [0, 100], rounded to one decimal.
    pub score: f64,
}

/// One matched skill for display. Keyword matches carry a fixed
/// confidence of 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSkill {
    pub skill: String,
    pub category: String,
    pub confidence: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
}

/// One missing skill for display, with a priority derived from its
/// category's high-priority flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub skill: String,
    pub category: String,
    pub priority: Priority,
}

/// Full output of the scorer.
///
/// Invariant: `overall_score` is earned points over total points across
/// all categories the JD profile has skills in; categories absent from
/// the JD contribute no weight and are excluded, not penalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Vec<CategoryMatch>,
    pub missing: Vec<CategoryMatch>,
    pub category_scores: Vec<CategoryScore>,
    pub overall_score: f64,
    pub matched_flat: Vec<MatchedSkill>,
    pub missing_flat: Vec<MissingSkill>,
}

/// Compares two skill profiles sharing `taxonomy`.
///
/// Per category, in taxonomy-declared order:
/// 1. Skip categories the JD profile has no skills in (no weight).
/// 2. matched = resume ∩ jd; missing = jd − resume. Categories are never
///    merged: a skill matched only under a different resume category
///    stays missing.
/// 3. weight = |jd| × 10, earned = |matched| × 10; category score is
///    earned/weight × 100 rounded to one decimal.
///
/// Overall score is total earned over total weight × 100 (one decimal),
/// or 0 when the JD had no detected skills at all.
pub fn compute_skill_match(
    resume: &SkillProfile,
    jd: &SkillProfile,
    taxonomy: &SkillTaxonomy,
) -> MatchResult {
    let mut result = MatchResult {
        matched: Vec::new(),
        missing: Vec::new(),
        category_scores: Vec::new(),
        overall_score: 0.0,
        matched_flat: Vec::new(),
        missing_flat: Vec::new(),
    };

    let mut total_points = 0.0;
    let mut earned_points = 0.0;

    for category in &taxonomy.categories {
        let jd_skills = jd.skills_for(&category.name);
        if jd_skills.is_empty() {
            continue;
        }
        let resume_skills = resume.skills_for(&category.name);

        let (matched, missing): (Vec<String>, Vec<String>) = jd_skills
            .iter()
            .cloned()
            .partition(|skill| resume_skills.contains(skill));

        let category_total = jd_skills.len() as f64 * POINTS_PER_SKILL;
        let category_earned = matched.len() as f64 * POINTS_PER_SKILL;
        total_points += category_total;
        earned_points += category_earned;

        result.category_scores.push(CategoryScore {
            category: category.name.clone(),
            score: round_one_decimal(category_earned / category_total * 100.0),
        });

        let priority = if category.high_priority {
            Priority::High
        } else {
            Priority::Medium
        };

        for skill in &matched {
            result.matched_flat.push(MatchedSkill {
                skill: skill.clone(),
                category: category.name.clone(),
                confidence: 100,
            });
        }
        for skill in &missing {
            result.missing_flat.push(MissingSkill {
                skill: skill.clone(),
                category: category.name.clone(),
                priority,
            });
        }

        result.matched.push(CategoryMatch {
            category: category.name.clone(),
            skills: matched,
        });
        result.missing.push(CategoryMatch {
            category: category.name.clone(),
            skills: missing,
        });
    }

    result.overall_score = if total_points > 0.0 {
        round_one_decimal(earned_points / total_points * 100.0)
    } else {
        0.0
    };

    result
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::taxonomy::{detect_skills, SkillCategory, SkillTaxonomy};

    fn taxonomy() -> SkillTaxonomy {
        SkillTaxonomy::from_categories(vec![
            SkillCategory {
                name: "Tech".to_string(),
                skills: vec!["Python".to_string(), "Go".to_string()],
                high_priority: true,
            },
            SkillCategory {
                name: "Tools".to_string(),
                skills: vec!["Docker".to_string()],
                high_priority: false,
            },
            SkillCategory {
                name: "Soft Skills".to_string(),
                skills: vec!["Leadership".to_string()],
                high_priority: false,
            },
        ])
    }

    #[test]
    fn test_worked_scenario_scores_66_7() {
        let tax = taxonomy();
        let resume = detect_skills("Python and Docker experience", &tax);
        let jd = detect_skills("Python, Go, Docker", &tax);

        let result = compute_skill_match(&resume, &jd, &tax);

        assert_eq!(
            result.matched,
            vec![
                CategoryMatch {
                    category: "Tech".to_string(),
                    skills: vec!["Python".to_string()],
                },
                CategoryMatch {
                    category: "Tools".to_string(),
                    skills: vec!["Docker".to_string()],
                },
            ]
        );
        assert_eq!(
            result.missing,
            vec![
                CategoryMatch {
                    category: "Tech".to_string(),
                    skills: vec!["Go".to_string()],
                },
                CategoryMatch {
                    category: "Tools".to_string(),
                    skills: vec![],
                },
            ]
        );
        assert_eq!(result.category_scores[0].score, 50.0);
        assert_eq!(result.category_scores[1].score, 100.0);
        // (10 + 10) / (20 + 10) * 100 = 66.666… → 66.7
        assert_eq!(result.overall_score, 66.7);
    }

    #[test]
    fn test_empty_jd_profile_scores_zero_with_empty_flats() {
        let tax = taxonomy();
        let resume = detect_skills("Python, Go, Docker, Leadership", &tax);
        let jd = detect_skills("", &tax);

        let result = compute_skill_match(&resume, &jd, &tax);
        assert_eq!(result.overall_score, 0.0);
        assert!(result.matched_flat.is_empty());
        assert!(result.missing_flat.is_empty());
        assert!(result.category_scores.is_empty());
    }

    #[test]
    fn test_resume_superset_scores_100_with_no_missing() {
        let tax = taxonomy();
        let resume = detect_skills("Python Go Docker Leadership", &tax);
        let jd = detect_skills("Go and Docker", &tax);

        let result = compute_skill_match(&resume, &jd, &tax);
        assert_eq!(result.overall_score, 100.0);
        assert!(result.missing_flat.is_empty());
    }

    #[test]
    fn test_scores_are_bounded() {
        let tax = taxonomy();
        let resume = detect_skills("Docker", &tax);
        let jd = detect_skills("Python Go Docker Leadership", &tax);

        let result = compute_skill_match(&resume, &jd, &tax);
        assert!(result.overall_score >= 0.0 && result.overall_score <= 100.0);
        for cs in &result.category_scores {
            assert!(cs.score >= 0.0 && cs.score <= 100.0);
        }
    }

    #[test]
    fn test_flats_partition_the_jd_profile() {
        let tax = taxonomy();
        let resume = detect_skills("Python and Leadership", &tax);
        let jd = detect_skills("Python Go Docker Leadership", &tax);

        let result = compute_skill_match(&resume, &jd, &tax);

        let mut flat: Vec<(String, String)> = result
            .matched_flat
            .iter()
            .map(|m| (m.category.clone(), m.skill.clone()))
            .chain(
                result
                    .missing_flat
                    .iter()
                    .map(|m| (m.category.clone(), m.skill.clone())),
            )
            .collect();
        let mut expected: Vec<(String, String)> = jd
            .categories
            .iter()
            .flat_map(|c| {
                c.skills
                    .iter()
                    .map(|s| (c.category.clone(), s.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        flat.sort();
        expected.sort();
        assert_eq!(flat, expected);
    }

    #[test]
    fn test_missing_priority_follows_category_flag() {
        let tax = taxonomy();
        let resume = detect_skills("", &tax);
        let jd = detect_skills("Go, Docker, Leadership", &tax);

        let result = compute_skill_match(&resume, &jd, &tax);
        let priority_of = |skill: &str| {
            result
                .missing_flat
                .iter()
                .find(|m| m.skill == skill)
                .map(|m| m.priority)
                .unwrap()
        };
        assert_eq!(priority_of("Go"), Priority::High);
        assert_eq!(priority_of("Docker"), Priority::Medium);
        assert_eq!(priority_of("Leadership"), Priority::Medium);
    }

    #[test]
    fn test_categories_are_not_merged() {
        // "Go" sits under Tech in the JD. Even though the resume has a
        // Tools hit, Go stays missing: categories never merge.
        let tax = taxonomy();
        let resume = detect_skills("Docker", &tax);
        let jd = detect_skills("Go", &tax);

        let result = compute_skill_match(&resume, &jd, &tax);
        assert_eq!(result.missing_flat.len(), 1);
        assert_eq!(result.missing_flat[0].skill, "Go");
        assert_eq!(result.missing_flat[0].category, "Tech");
        assert_eq!(result.overall_score, 0.0);
    }

    #[test]
    fn test_matched_confidence_is_fixed_100() {
        let tax = taxonomy();
        let resume = detect_skills("Python", &tax);
        let jd = detect_skills("Python", &tax);

        let result = compute_skill_match(&resume, &jd, &tax);
        assert_eq!(result.matched_flat[0].confidence, 100);
    }

    #[test]
    fn test_flat_order_follows_taxonomy_order() {
        let tax = taxonomy();
        let resume = detect_skills("", &tax);
        let jd = detect_skills("Docker, Go, Python, Leadership", &tax);

        let result = compute_skill_match(&resume, &jd, &tax);
        let order: Vec<&str> = result.missing_flat.iter().map(|m| m.skill.as_str()).collect();
        assert_eq!(order, ["Python", "Go", "Docker", "Leadership"]);
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(66.666_666), 66.7);
        assert_eq!(round_one_decimal(50.0), 50.0);
        assert_eq!(round_one_decimal(33.333_333), 33.3);
    }
}
