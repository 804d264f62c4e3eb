use crate::layout::LayoutModel;
use crate::model::TimelineData;

/// Errors at the JSON boundaries of the engine.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    /// The input snapshot could not be decoded.
    #[error("invalid timeline data: {0}")]
    Decode(#[source] serde_json::Error),
    /// The computed layout could not be encoded.
    #[error("layout encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Decode a project snapshot from the backend's JSON shape.
///
/// Malformed dates inside the payload decode as absent rather than
/// failing the whole snapshot; only structurally invalid JSON errors.
pub fn parse_timeline_data(json: &str) -> Result<TimelineData, JsonError> {
    serde_json::from_str(json).map_err(JsonError::Decode)
}

/// Encode a computed layout for the rendering layer.
pub fn layout_to_json(layout: &LayoutModel) -> Result<String, JsonError> {
    serde_json::to_string_pretty(layout).map_err(JsonError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_minimal_snapshot() {
        let data = parse_timeline_data(
            r##"{
                "project": {"id": "p1", "title": "Thesis", "weekly_work_hours": 12},
                "timeline": {"start_date": "2024-01-01", "time_unit": "month"},
                "goals": [
                    {"id": "g1", "title": "Research", "estimate_hours": 24,
                     "created_at": "2024-01-02T09:00:00Z",
                     "tasks": [{"id": "t1", "title": "Survey", "estimate_hours": 24,
                                "progress_percentage": 30, "status_color": "#4285F4"}]}
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(data.goals.len(), 1);
        assert_eq!(data.goals[0].tasks[0].progress_percentage, 30.0);
    }

    #[test]
    fn structurally_invalid_json_is_an_error() {
        assert!(parse_timeline_data("{not json").is_err());
    }

    #[test]
    fn layout_roundtrips_through_json() {
        let engine = crate::layout::LayoutEngine::default();
        let data = parse_timeline_data(
            r#"{"project": {"id": "p", "title": "P", "weekly_work_hours": 10},
                "goals": [{"id": "a", "title": "A", "estimate_hours": 10,
                           "created_at": "2024-01-01"}]}"#,
        )
        .unwrap();
        let layout = engine.compute_layout(&data);
        let encoded = layout_to_json(&layout).unwrap();
        assert!(encoded.contains("\"goals\""));
        assert!(encoded.contains("\"pixels_per_day\""));
    }
}
