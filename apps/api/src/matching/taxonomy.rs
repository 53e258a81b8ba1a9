//! Skill Taxonomy: the fixed, categorized skill vocabulary, and the
//! substring-containment detector that scans raw text against it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One category of the taxonomy. Order of `skills` is the declared order
/// and is preserved through detection and scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
    /// Missing skills in high-priority categories are reported as
    /// priority "High" instead of "Medium".
    #[serde(default)]
    pub high_priority: bool,
}

/// The full catalog of skill names grouped into ordered categories.
/// Loaded once at startup and shared immutably for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillTaxonomy {
    pub categories: Vec<SkillCategory>,
}

impl SkillTaxonomy {
    /// Loads the taxonomy from a JSON file holding a list of categories.
    /// The list form keeps category iteration order deterministic.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill taxonomy: {}", path.display()))?;
        let taxonomy: SkillTaxonomy = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse skill taxonomy: {}", path.display()))?;
        Ok(taxonomy)
    }

    pub fn from_categories(categories: Vec<SkillCategory>) -> Self {
        Self { categories }
    }

    pub fn skill_count(&self) -> usize {
        self.categories.iter().map(|c| c.skills.len()).sum()
    }

    pub fn is_high_priority(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.name == category && c.high_priority)
    }
}

/// Skills found in one text, grouped per category. Every taxonomy category
/// appears, empty or not, in taxonomy order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryHits {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillProfile {
    pub categories: Vec<CategoryHits>,
}

impl SkillProfile {
    /// Skills detected for a category, empty when the category had no hits
    /// or is not part of the profile's taxonomy.
    pub fn skills_for(&self, category: &str) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.skills.as_slice())
            .unwrap_or(&[])
    }

    /// True when no category has any detected skill.
    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.skills.is_empty())
    }
}

/// Detects which taxonomy skills are mentioned in `text`.
///
/// Detection is case-insensitive substring containment, with no stemming,
/// tokenization, or word-boundary enforcement. A short skill name that is
/// a substring of a longer word will false-positive (e.g. "Go" inside
/// "Google"). That behavior is documented and kept: consumers depend on it.
pub fn detect_skills(text: &str, taxonomy: &SkillTaxonomy) -> SkillProfile {
    let text_lower = text.to_lowercase();

    let categories = taxonomy
        .categories
        .iter()
        .map(|category| CategoryHits {
            category: category.name.clone(),
            skills: category
                .skills
                .iter()
                .filter(|skill| text_lower.contains(&skill.to_lowercase()))
                .cloned()
                .collect(),
        })
        .collect();

    SkillProfile { categories }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_taxonomy() -> SkillTaxonomy {
        SkillTaxonomy::from_categories(vec![
            SkillCategory {
                name: "Tech".to_string(),
                skills: vec!["Python".to_string(), "Go".to_string(), "Rust".to_string()],
                high_priority: true,
            },
            SkillCategory {
                name: "Tools".to_string(),
                skills: vec!["Docker".to_string()],
                high_priority: false,
            },
        ])
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        let profile = detect_skills("Experienced in PYTHON and docker", &sample_taxonomy());
        assert_eq!(profile.skills_for("Tech"), ["Python"]);
        assert_eq!(profile.skills_for("Tools"), ["Docker"]);
    }

    #[test]
    fn test_detection_preserves_taxonomy_order() {
        let profile = detect_skills("Rust then Go then Python", &sample_taxonomy());
        assert_eq!(profile.skills_for("Tech"), ["Python", "Go", "Rust"]);
    }

    #[test]
    fn test_empty_categories_still_appear() {
        let profile = detect_skills("Python only", &sample_taxonomy());
        assert_eq!(profile.categories.len(), 2);
        assert!(profile.skills_for("Tools").is_empty());
    }

    #[test]
    fn test_detection_is_idempotent() {
        let taxonomy = sample_taxonomy();
        let text = "Python, Docker, and a bit of Go";
        assert_eq!(detect_skills(text, &taxonomy), detect_skills(text, &taxonomy));
    }

    #[test]
    fn test_substring_false_positive_is_accepted_behavior() {
        // "Go" inside "Google" counts as a hit. No word boundaries by design.
        let profile = detect_skills("Worked at Google on search", &sample_taxonomy());
        assert_eq!(profile.skills_for("Tech"), ["Go"]);
    }

    #[test]
    fn test_empty_text_yields_empty_profile() {
        let profile = detect_skills("", &sample_taxonomy());
        assert!(profile.is_empty());
    }

    #[test]
    fn test_taxonomy_deserializes_from_list_form() {
        let json = r#"[
            {"name": "Tech", "high_priority": true, "skills": ["Python"]},
            {"name": "Soft Skills", "skills": ["Leadership"]}
        ]"#;
        let taxonomy: SkillTaxonomy = serde_json::from_str(json).unwrap();
        assert_eq!(taxonomy.categories.len(), 2);
        assert!(taxonomy.is_high_priority("Tech"));
        assert!(!taxonomy.is_high_priority("Soft Skills"));
        assert_eq!(taxonomy.skill_count(), 2);
    }
}
