use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A subscription tier offered by the backend.
/// `price` is a DRF decimal field, which serializes as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub max_screens: i64,
    pub video_quality: String,
}

/// Server-provided identity data for the signed-in user.
///
/// Owned by the session manager and passed through opaquely to callers;
/// unknown fields from the backend are ignored rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Plan primary key as registered on the account
    #[serde(default)]
    pub plan: Option<i64>,
    #[serde(default)]
    pub plan_details: Option<SubscriptionPlan>,
    #[serde(default)]
    pub subscription_active: bool,
    #[serde(default)]
    pub subscription_end_date: Option<NaiveDate>,
}

impl UserProfile {
    /// Display name: "First Last" when present, username otherwise
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                format!("{} {}", first, last)
            }
            (Some(first), _) if !first.is_empty() => first.to_string(),
            _ => self.username.clone(),
        }
    }
}

/// Fields posted to the registration endpoint.
/// `password2` is the backend's confirmation field and must match `password`.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    /// Plan primary key
    pub plan: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parses_minimal_payload() {
        let json = r#"{"id": 1, "username": "testuser"}"#;
        let profile: UserProfile = serde_json::from_str(json).expect("minimal profile");
        assert_eq!(profile.id, 1);
        assert_eq!(profile.username, "testuser");
        assert!(profile.email.is_none());
        assert!(!profile.subscription_active);
    }

    #[test]
    fn test_profile_parses_full_payload() {
        let json = r#"{
            "id": 7,
            "username": "ana",
            "email": "ana@example.com",
            "first_name": "Ana",
            "last_name": "Diaz",
            "plan": 2,
            "plan_details": {
                "id": 2,
                "name": "Premium",
                "price": "15.99",
                "max_screens": 4,
                "video_quality": "4K"
            },
            "subscription_active": true,
            "subscription_end_date": "2026-09-30"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).expect("full profile");
        assert_eq!(profile.display_name(), "Ana Diaz");
        assert_eq!(profile.plan_details.as_ref().unwrap().max_screens, 4);
        assert!(profile.subscription_active);
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let json = r#"{"id": 1, "username": "solo", "first_name": "", "last_name": ""}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.display_name(), "solo");
    }

    #[test]
    fn test_registration_request_omits_empty_names() {
        let req = RegistrationRequest {
            username: "newuser".to_string(),
            email: "new@example.com".to_string(),
            password: "password123".to_string(),
            password2: "password123".to_string(),
            plan: 1,
            first_name: None,
            last_name: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("first_name").is_none());
        assert!(json.get("last_name").is_none());
        assert_eq!(json["password2"], "password123");
    }
}
