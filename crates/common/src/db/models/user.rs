//! User account document

use mongodb::bson::{doc, oid::ObjectId, Document};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Prefix of every generated user identifier
pub const USER_ID_PREFIX: &str = "USR";

/// Exclusive upper bound of the numeric suffix
pub const USER_ID_RANGE: u32 = 1_000_000;

/// A user account. `email` is the lookup key for reads, updates and deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Human-facing identifier, assigned once at creation
    pub user_id: String,

    pub full_name: String,

    pub college_name: String,

    pub email: String,

    /// Argon2 PHC string
    pub password: String,
}

/// Generate a user identifier: the fixed prefix followed by a random integer
/// in `[0, USER_ID_RANGE)`. Uniqueness is not checked.
pub fn generate_user_id<R: Rng>(rng: &mut R) -> String {
    format!("{}{}", USER_ID_PREFIX, rng.gen_range(0..USER_ID_RANGE))
}

/// Partial update merged into an existing user.
///
/// Only the mutable profile fields are representable; `_id` and `userId`
/// cannot be changed through an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserUpdate {
    /// True when the update would not change anything
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.college_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
    }

    /// Fields for a `$set` operator, using the stored field names
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(ref full_name) = self.full_name {
            set.insert("fullName", full_name.as_str());
        }
        if let Some(ref college_name) = self.college_name {
            set.insert("collegeName", college_name.as_str());
        }
        if let Some(ref email) = self.email {
            set.insert("email", email.as_str());
        }
        if let Some(ref password) = self.password {
            set.insert("password", password.as_str());
        }
        set
    }

    /// Full update document for `find_one_and_update`
    pub fn to_update_document(&self) -> Document {
        doc! { "$set": self.to_set_document() }
    }

    /// Apply the update to an in-memory record
    pub fn apply(&self, user: &mut User) {
        if let Some(ref full_name) = self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(ref college_name) = self.college_name {
            user.college_name = college_name.clone();
        }
        if let Some(ref email) = self.email {
            user.email = email.clone();
        }
        if let Some(ref password) = self.password {
            user.password = password.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn sample_user() -> User {
        User {
            id: None,
            user_id: "USR42".into(),
            full_name: "Rahim Uddin".into(),
            college_name: "Notre Dame College".into(),
            email: "rahim@example.com".into(),
            password: "$argon2id$stub".into(),
        }
    }

    #[test]
    fn test_generated_ids_have_prefix_and_bounded_suffix() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let id = generate_user_id(&mut rng);
            let suffix = id.strip_prefix(USER_ID_PREFIX).expect("prefix");
            let n: u32 = suffix.parse().expect("numeric suffix");
            assert!(n < USER_ID_RANGE);
        }
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let value = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(value["userId"], "USR42");
        assert_eq!(value["fullName"], "Rahim Uddin");
        assert_eq!(value["collegeName"], "Notre Dame College");
    }

    #[test]
    fn test_update_ignores_identity_fields() {
        let update: UserUpdate = serde_json::from_value(serde_json::json!({
            "fullName": "X",
            "userId": "USR1",
            "_id": "66a1f0c2e4b0a1b2c3d4e5f6"
        }))
        .unwrap();

        assert_eq!(update.full_name.as_deref(), Some("X"));
        let set = update.to_set_document();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("fullName").unwrap(), "X");
    }

    #[test]
    fn test_apply_changes_only_provided_fields() {
        let mut user = sample_user();
        let update = UserUpdate {
            college_name: Some("Dhaka College".into()),
            ..Default::default()
        };
        update.apply(&mut user);

        assert_eq!(user.college_name, "Dhaka College");
        assert_eq!(user.full_name, "Rahim Uddin");
        assert_eq!(user.user_id, "USR42");
    }

    #[test]
    fn test_empty_update() {
        assert!(UserUpdate::default().is_empty());
        assert!(UserUpdate::default().to_set_document().is_empty());
    }
}
