//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User entity as stored
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub image: String,
    pub favorites: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user creation payload. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub image: String,
}

/// User as exposed over HTTP, without the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub image: String,
    pub favorites: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            username: user.username,
            email: user.email,
            image: user.image,
            favorites: user.favorites,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Signup request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_never_carries_password_hash() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: "neo".to_string(),
            email: "neo@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            image: "/avatar1.png".to_string(),
            favorites: vec!["603".to_string()],
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(UserProfile::from(user)).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_hash"));
        assert_eq!(object["favorites"], serde_json::json!(["603"]));
    }

    #[test]
    fn test_signup_request_missing_fields_default_to_empty() {
        let request: SignupRequest = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(request.email, "a@b.com");
        assert!(request.username.is_empty());
        assert!(request.password.is_empty());
    }
}
