//! Adversarial critique of the leading facts.
//!
//! The critic is asked for JSON of the form
//! `{"counterarguments":[{"claim","challenge","severity"}]}`. Models do not
//! always comply, so [`parse_critique_response`] falls back to treating each
//! non-empty line of the raw response as one challenge.

use crate::fact::extract::strip_list_marker;
use serde::{Deserialize, Serialize};

/// Maximum number of critique points kept from a single response.
pub const MAX_CRITIQUE_POINTS: usize = 8;

/// Severity of a counterargument as reported by the critic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" | "minor" => Severity::Low,
            "high" | "major" | "critical" => Severity::High,
            _ => Severity::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// One counterargument raised against a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritiquePoint {
    /// The claim under challenge; empty when the critic didn't name one
    pub claim: String,
    pub challenge: String,
    pub severity: Severity,
}

/// Outcome of the critique stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Critique {
    pub agent: String,
    pub model: String,
    pub points: Vec<CritiquePoint>,
    /// Whether the response parsed as the requested JSON shape
    pub structured: bool,
}

impl Critique {
    /// A critique with no points, used when the critic call failed.
    pub fn empty(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Deserialize)]
struct RawCritique {
    #[serde(default)]
    counterarguments: Vec<RawPoint>,
}

#[derive(Deserialize)]
struct RawPoint {
    #[serde(default)]
    claim: String,
    #[serde(default)]
    challenge: String,
    #[serde(default)]
    severity: String,
}

/// Locate the outermost JSON object in free-form model output.
///
/// Handles fenced code blocks and leading prose by taking everything from the
/// first `{` to the last `}`.
pub fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

/// Parse the critic's response into points.
///
/// Returns the points and whether the structured form was recognized.
pub fn parse_critique_response(response: &str) -> (Vec<CritiquePoint>, bool) {
    if let Some(json) = extract_json_object(response)
        && let Ok(raw) = serde_json::from_str::<RawCritique>(json)
    {
        let points: Vec<CritiquePoint> = raw
            .counterarguments
            .into_iter()
            .filter(|p| !p.challenge.trim().is_empty())
            .take(MAX_CRITIQUE_POINTS)
            .map(|p| CritiquePoint {
                claim: p.claim.trim().to_string(),
                challenge: p.challenge.trim().to_string(),
                severity: Severity::parse_lenient(&p.severity),
            })
            .collect();
        return (points, true);
    }

    let points = response
        .lines()
        .map(strip_list_marker)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .take(MAX_CRITIQUE_POINTS)
        .map(|line| CritiquePoint {
            claim: String::new(),
            challenge: line.to_string(),
            severity: Severity::Medium,
        })
        .collect();
    (points, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_structured() {
        let response = r#"Here is my critique:
```json
{"counterarguments": [
  {"claim": "Revenue grew 12%", "challenge": "Source is a press release", "severity": "high"},
  {"claim": "Costs fell", "challenge": "Only one quarter observed", "severity": "whatever"}
]}
```"#;
        let (points, structured) = parse_critique_response(response);
        assert!(structured);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].severity, Severity::High);
        assert_eq!(points[1].severity, Severity::Medium);
        assert_eq!(points[0].claim, "Revenue grew 12%");
    }

    #[test]
    fn test_parse_falls_back_to_lines() {
        let response = "- The sample size is small\n\n- Data is two years old\n";
        let (points, structured) = parse_critique_response(response);
        assert!(!structured);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].challenge, "The sample size is small");
        assert!(points[1].claim.is_empty());
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let (points, structured) = parse_critique_response("{not json at all}");
        assert!(!structured);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_points_capped() {
        let response = (0..20)
            .map(|i| format!("- point {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let (points, _) = parse_critique_response(&response);
        assert_eq!(points.len(), MAX_CRITIQUE_POINTS);
    }

    #[test]
    fn test_extract_json_object() {
        assert_eq!(extract_json_object("x {\"a\":1} y"), Some("{\"a\":1}"));
        assert_eq!(extract_json_object("} {"), None);
        assert_eq!(extract_json_object("none"), None);
    }
}
