//! Parse model output into triplets

use crate::InferenceError;
use resumegraph_domain::Triplet;
use serde_json::Value;
use tracing::warn;

/// Parse a model's JSON response into triplets
///
/// Items missing any of the three core fields are skipped with a warning;
/// a response that is not a JSON array at all is an error.
pub fn parse_triplets(response: &str) -> Result<Vec<Triplet>, InferenceError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| InferenceError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    let items = json
        .as_array()
        .ok_or_else(|| InferenceError::InvalidResponse("Expected JSON array".to_string()))?;

    let mut triplets = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        match parse_triplet_json(item) {
            Ok(triplet) => triplets.push(triplet),
            Err(e) => {
                warn!("Failed to parse triplet {}: {}", idx, e);
            }
        }
    }

    Ok(triplets)
}

/// Extract JSON from a response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, InferenceError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```json") || trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(InferenceError::InvalidResponse(
                "Empty code block".to_string(),
            ));
        }

        // Skip first line (```json or ```) and last line (```)
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a single triplet from JSON
fn parse_triplet_json(json: &Value) -> Result<Triplet, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Triplet is not a JSON object".to_string())?;

    let required = |field: &str| -> Result<String, String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| format!("Missing or invalid '{}'", field))
    };

    let optional = |field: &str| -> String {
        obj.get(field)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    let mut triplet = Triplet::new(
        required("subject")?,
        required("predicate")?,
        required("object")?,
    );
    triplet.subject_type = optional("subject_type");
    triplet.object_type = optional("object_type");
    triplet.subject_description = optional("subject_description");
    triplet.object_description = optional("object_description");
    triplet.relationship_description = optional("relationship_description");

    Ok(triplet)
}
