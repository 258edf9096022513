//! Defect report model matching the mobile client's DefectReport type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// One reported equipment defect with its location and optional photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectReport {
    pub id: String,
    /// Equipment name
    pub title: String,
    /// What is wrong with it
    pub description: String,
    pub laboratory: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Base64 data URL of the photo
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for reporting a new defect.
///
/// Every field is optional here so that an absent field surfaces as a
/// validation error naming it, not as a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub laboratory: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// A create request that passed validation; the only input the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub laboratory: String,
    pub latitude: f64,
    pub longitude: f64,
    pub photo: Option<String>,
}

impl CreateReportRequest {
    /// Names of the required fields that are absent or empty, in wire order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_empty(&self.title) {
            missing.push("title");
        }
        if is_empty(&self.description) {
            missing.push("description");
        }
        if is_empty(&self.laboratory) {
            missing.push("laboratory");
        }
        // Coordinates are only missing when null; 0.0 is a real position.
        if self.latitude.is_none() {
            missing.push("latitude");
        }
        if self.longitude.is_none() {
            missing.push("longitude");
        }
        missing
    }

    /// Validate the request and turn it into a [`NewReport`].
    pub fn validate(self) -> Result<NewReport, AppError> {
        let missing = self.missing_fields();
        let CreateReportRequest {
            title: Some(title),
            description: Some(description),
            laboratory: Some(laboratory),
            latitude: Some(latitude),
            longitude: Some(longitude),
            photo,
        } = self
        else {
            return Err(missing_fields_error(&missing));
        };
        if !missing.is_empty() {
            return Err(missing_fields_error(&missing));
        }

        Ok(NewReport {
            title,
            description,
            laboratory,
            latitude,
            longitude,
            photo: photo.filter(|p| !p.is_empty()),
        })
    }
}

fn missing_fields_error(missing: &[&str]) -> AppError {
    AppError::Validation(format!("Missing required fields: {}", missing.join(", ")))
}

fn is_empty(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateReportRequest {
        CreateReportRequest {
            title: Some("Microscope".to_string()),
            description: Some("Broken lens".to_string()),
            laboratory: Some("Lab A".to_string()),
            latitude: Some(10.5),
            longitude: Some(20.3),
            photo: None,
        }
    }

    #[test]
    fn test_valid_request() {
        let report = full_request().validate().unwrap();
        assert_eq!(report.title, "Microscope");
        assert_eq!(report.laboratory, "Lab A");
        assert_eq!(report.latitude, 10.5);
        assert!(report.photo.is_none());
    }

    #[test]
    fn test_zero_coordinates_are_valid() {
        let request = CreateReportRequest {
            latitude: Some(0.0),
            longitude: Some(0.0),
            ..full_request()
        };
        assert!(request.missing_fields().is_empty());
        let report = request.validate().unwrap();
        assert_eq!(report.latitude, 0.0);
        assert_eq!(report.longitude, 0.0);
    }

    #[test]
    fn test_missing_fields_listed() {
        let request = CreateReportRequest {
            title: Some("".to_string()),
            laboratory: None,
            longitude: None,
            ..full_request()
        };
        assert_eq!(
            request.missing_fields(),
            vec!["title", "laboratory", "longitude"]
        );

        let err = request.validate().unwrap_err();
        assert_eq!(
            err.message(),
            "Missing required fields: title, laboratory, longitude"
        );
    }

    #[test]
    fn test_whitespace_text_is_present() {
        let request = CreateReportRequest {
            title: Some("   ".to_string()),
            description: Some(" ".to_string()),
            laboratory: Some("\t".to_string()),
            ..full_request()
        };
        assert!(request.missing_fields().is_empty());

        let report = request.validate().unwrap();
        assert_eq!(report.title, "   ");
        assert_eq!(report.laboratory, "\t");
    }

    #[test]
    fn test_empty_request_misses_everything() {
        assert_eq!(
            CreateReportRequest::default().missing_fields(),
            vec!["title", "description", "laboratory", "latitude", "longitude"]
        );
    }

    #[test]
    fn test_empty_photo_becomes_none() {
        let request = CreateReportRequest {
            photo: Some(String::new()),
            ..full_request()
        };
        assert!(request.validate().unwrap().photo.is_none());

        let request = CreateReportRequest {
            photo: Some("data:image/jpeg;base64,AAAA".to_string()),
            ..full_request()
        };
        assert_eq!(
            request.validate().unwrap().photo.as_deref(),
            Some("data:image/jpeg;base64,AAAA")
        );
    }

    #[test]
    fn test_request_deserializes_nulls() {
        let request: CreateReportRequest = serde_json::from_str(
            r#"{"title":"Scale","description":"Drifts","laboratory":"Lab B","latitude":null,"extra":1}"#,
        )
        .unwrap();
        assert_eq!(request.missing_fields(), vec!["latitude", "longitude"]);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = DefectReport {
            id: "abc".to_string(),
            title: "Microscope".to_string(),
            description: "Broken lens".to_string(),
            laboratory: "Lab A".to_string(),
            latitude: 10.5,
            longitude: 20.3,
            photo: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["id"], "abc");
        assert!(json["createdAt"].is_string());
        assert!(json["photo"].is_null());
    }
}
