//! User model for storage and API.

use crate::models::PlaceRecord;
use serde::{Deserialize, Serialize};

/// User document stored in Firestore.
///
/// Favourites are embedded: they have no lifecycle of their own and every
/// mutation is a read-modify-write of this one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned id (also used as document ID)
    pub id: String,
    /// Display name
    pub username: String,
    /// Email address, unique across users (case-sensitive as stored)
    pub email: String,
    /// PBKDF2 password hash, never exposed over the wire
    pub password_hash: String,
    /// Profile picture URL, empty if unset
    #[serde(default)]
    pub profile_picture: String,
    /// Interest tags; replaced wholesale, never merged
    #[serde(default)]
    pub preferences: Vec<String>,
    /// Favourited places, unique by `place_id`
    #[serde(default)]
    pub favorites: Vec<PlaceRecord>,
    /// When the account was created (RFC3339)
    pub created_at: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            profile_picture: String::new(),
            preferences: Vec::new(),
            favorites: Vec::new(),
            created_at: crate::time_utils::now_rfc3339(),
        }
    }

    /// Append a favourite. No-op if a favourite with the same `place_id`
    /// already exists; returns whether the list changed.
    pub fn add_favorite(&mut self, place: PlaceRecord) -> bool {
        if self.favorites.iter().any(|f| f.place_id == place.place_id) {
            return false;
        }
        self.favorites.push(place);
        true
    }

    /// Remove any favourite matching `place_id`. Returns whether the list
    /// changed; removing an absent id is a no-op, not an error.
    pub fn remove_favorite(&mut self, place_id: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.place_id != place_id);
        self.favorites.len() != before
    }

    /// Apply a profile patch.
    ///
    /// Fields that are absent or falsy (empty string, empty interests list)
    /// are left untouched, so this can never clear a field; only
    /// PATCH /preferences can empty the preferences list.
    pub fn apply_patch(&mut self, patch: &ProfilePatch) {
        if let Some(username) = patch.username.as_deref() {
            if !username.is_empty() {
                self.username = username.to_string();
            }
        }
        if let Some(pic) = patch.profile_pic.as_deref() {
            if !pic.is_empty() {
                self.profile_picture = pic.to_string();
            }
        }
        if let Some(interests) = patch.interests.as_deref() {
            if !interests.is_empty() {
                self.preferences = interests.to_vec();
            }
        }
    }

    /// Redacted wire view of this user (no password hash, no internal id).
    pub fn profile_view(&self) -> ProfileView {
        ProfileView {
            username: self.username.clone(),
            email: self.email.clone(),
            preferences: self.preferences.clone(),
            profile_pic: self.profile_picture.clone(),
            favourites: self.favorites.clone(),
        }
    }
}

/// Redacted user view returned by login, GET /profile, and PATCH /profile.
///
/// Wire naming is fixed by the mobile client: `profilePic` and the British
/// `favourites`, regardless of internal naming.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileView {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(rename = "profilePic", default)]
    pub profile_pic: String,
    #[serde(default)]
    pub favourites: Vec<PlaceRecord>,
}

/// Partial profile update, shared between the PATCH /profile body and the
/// client-side mutation path. `interests` is an alias surface for
/// preferences and behaves exactly like PATCH /preferences when non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "profilePic", default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new("u1", "bob", "bob@x.com", "hash")
    }

    #[test]
    fn test_add_favorite_is_idempotent() {
        let mut user = test_user();

        assert!(user.add_favorite(PlaceRecord::new("p1", "Cafe X")));
        assert!(!user.add_favorite(PlaceRecord::new("p1", "Cafe X renamed")));
        assert_eq!(user.favorites.len(), 1);
        // First write wins: the stored snapshot is not replaced
        assert_eq!(user.favorites[0].name, "Cafe X");
    }

    #[test]
    fn test_remove_favorite_absent_is_noop() {
        let mut user = test_user();
        user.add_favorite(PlaceRecord::new("p1", "Cafe X"));

        assert!(!user.remove_favorite("nope"));
        assert_eq!(user.favorites.len(), 1);
        assert!(user.remove_favorite("p1"));
        assert!(user.favorites.is_empty());
    }

    #[test]
    fn test_patch_updates_only_present_fields() {
        let mut user = test_user();
        user.preferences = vec!["cafe".to_string()];
        user.profile_picture = "http://pic".to_string();

        user.apply_patch(&ProfilePatch {
            username: Some("Alice".to_string()),
            ..Default::default()
        });

        assert_eq!(user.username, "Alice");
        assert_eq!(user.profile_picture, "http://pic");
        assert_eq!(user.preferences, vec!["cafe".to_string()]);
    }

    #[test]
    fn test_patch_treats_falsy_as_absent() {
        let mut user = test_user();
        user.preferences = vec!["cafe".to_string()];

        user.apply_patch(&ProfilePatch {
            username: Some(String::new()),
            profile_pic: Some(String::new()),
            interests: Some(vec![]),
        });

        // Nothing cleared: empty values are treated as "not provided"
        assert_eq!(user.username, "bob");
        assert_eq!(user.profile_picture, "");
        assert_eq!(user.preferences, vec!["cafe".to_string()]);
    }

    #[test]
    fn test_patch_interests_replaces_preferences() {
        let mut user = test_user();
        user.preferences = vec!["cafe".to_string(), "museum".to_string()];

        user.apply_patch(&ProfilePatch {
            interests: Some(vec!["park".to_string()]),
            ..Default::default()
        });

        assert_eq!(user.preferences, vec!["park".to_string()]);
    }

    #[test]
    fn test_profile_view_redacts_secret() {
        let user = test_user();
        let view = serde_json::to_value(user.profile_view()).unwrap();

        assert!(view.get("password_hash").is_none());
        assert!(view.get("favourites").is_some());
        assert!(view.get("profilePic").is_some());
    }
}
