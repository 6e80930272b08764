use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::model::Level;

/// Read-only view of the ratings and annotations recorded per domain.
pub trait AssessmentSource {
    fn rating(&self, domain: &str) -> Option<Level>;
    fn evidence(&self, domain: &str) -> &str;
    fn next_steps(&self, domain: &str) -> &str;
}

/// Ratings and annotations keyed by domain name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assessment {
    ratings: HashMap<String, Level>,
    evidence: HashMap<String, String>,
    next_steps: HashMap<String, String>,
}

#[derive(Deserialize)]
struct AssessmentFile {
    #[serde(default)]
    ratings: HashMap<String, String>,
    #[serde(default)]
    evidence: HashMap<String, String>,
    #[serde(default, alias = "nextSteps")]
    next_steps: HashMap<String, String>,
}

impl Assessment {
    pub fn new() -> Self {
        Assessment::default()
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", e, path.display()),
            ))
        })?;
        Self::from_json(&text)
    }

    /// Parse the JSON form: `{"ratings": {..}, "evidence": {..}, "next_steps": {..}}`.
    /// A blank rating clears the domain; an unknown level name is ignored with a warning.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let file: AssessmentFile =
            serde_json::from_str(text).map_err(|e| Error::InvalidAssessment(e.to_string()))?;

        let mut assessment = Assessment::new();
        for (domain, name) in file.ratings {
            match Level::parse(&name) {
                Some(level) => {
                    assessment.ratings.insert(domain, level);
                }
                None if name.trim().is_empty() => {}
                None => log::warn!("Unknown rating '{name}' for domain '{domain}'; treating as not rated"),
            }
        }
        assessment.evidence = file.evidence;
        assessment.next_steps = file.next_steps;
        Ok(assessment)
    }

    /// Set or clear the rating for a domain.
    pub fn set_rating(&mut self, domain: &str, level: Option<Level>) -> &mut Self {
        match level {
            Some(level) => {
                self.ratings.insert(domain.to_string(), level);
            }
            None => {
                self.ratings.remove(domain);
            }
        }
        self
    }

    pub fn set_evidence(&mut self, domain: &str, text: &str) -> &mut Self {
        self.evidence.insert(domain.to_string(), text.to_string());
        self
    }

    pub fn set_next_steps(&mut self, domain: &str, text: &str) -> &mut Self {
        self.next_steps.insert(domain.to_string(), text.to_string());
        self
    }
}

impl AssessmentSource for Assessment {
    fn rating(&self, domain: &str) -> Option<Level> {
        self.ratings.get(domain).copied()
    }

    fn evidence(&self, domain: &str) -> &str {
        self.evidence.get(domain).map_or("", String::as_str)
    }

    fn next_steps(&self, domain: &str) -> &str {
        self.next_steps.get(domain).map_or("", String::as_str)
    }
}
