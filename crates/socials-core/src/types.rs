use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// UsersPage / Pages
// ---------------------------------------------------------------------------

/// One page of `GET /users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub pages: Pages,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Pagination block of a users page. `next` is absent (or `null`) on the
/// last page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pages {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

impl UsersPage {
    pub fn is_last(&self) -> bool {
        self.pages.next.as_deref().map_or(true, |n| n.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// User / SocialProfile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub social_profiles: SocialProfiles,
}

impl User {
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    pub fn profiles(&self) -> &[SocialProfile] {
        &self.social_profiles.social_profiles
    }

    pub fn has_profiles(&self) -> bool {
        !self.social_profiles.social_profiles.is_empty()
    }
}

/// The API wraps the profile list in an object of its own:
/// `"social_profiles": {"type": "social_profile.list", "social_profiles": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialProfiles {
    #[serde(default, deserialize_with = "null_as_default")]
    pub social_profiles: Vec<SocialProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
