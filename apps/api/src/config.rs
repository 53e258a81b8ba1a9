use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub groq_model: String,
    pub skills_path: String,
    /// Maximum accepted upload body size in bytes.
    pub max_upload_bytes: usize,
    /// Lowercase file extensions accepted for uploaded documents.
    pub allowed_extensions: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_base_url: std::env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| "https://api.groq.com".to_string()),
            groq_model: std::env::var("GROQ_MODEL")
                .unwrap_or_else(|_| "llama-3.1-8b-instant".to_string()),
            skills_path: std::env::var("SKILLS_PATH").unwrap_or_else(|_| "skills.json".to_string()),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (5 * 1024 * 1024).to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a valid byte count")?,
            allowed_extensions: parse_extensions(
                &std::env::var("ALLOWED_EXTENSIONS")
                    .unwrap_or_else(|_| "pdf,docx,doc,txt".to_string()),
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses a comma-separated extension list into normalized lowercase entries.
fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extensions_normalizes_entries() {
        let exts = parse_extensions("pdf, .DOCX ,txt");
        assert_eq!(exts, vec!["pdf", "docx", "txt"]);
    }

    #[test]
    fn test_parse_extensions_skips_empty_entries() {
        let exts = parse_extensions("pdf,,txt,");
        assert_eq!(exts, vec!["pdf", "txt"]);
    }
}
