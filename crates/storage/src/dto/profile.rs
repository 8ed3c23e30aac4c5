use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Profile, Project, Social};

/// Request payload for creating a new profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must be between 1 and 255 characters"
    ))]
    pub full_name: String,

    #[validate(length(max = 255))]
    pub profession: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub socials: Vec<Social>,

    pub profile_picture: Option<String>,
}

/// Request payload for updating an existing profile. A `Some` field fully
/// replaces the stored value; a `None` field leaves it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,

    #[validate(length(max = 255))]
    pub profession: Option<String>,

    pub skills: Option<Vec<String>>,

    pub projects: Option<Vec<Project>>,

    pub socials: Option<Vec<Social>>,

    pub profile_picture: Option<String>,
}

impl UpdateProfileRequest {
    /// Merge-by-presence over the stored record. `updated_at` is refreshed;
    /// `profile_id` and `created_at` are never touched.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(full_name) = &self.full_name {
            profile.full_name = full_name.clone();
        }
        if let Some(profession) = &self.profession {
            profile.profession = Some(profession.clone());
        }
        if let Some(skills) = &self.skills {
            profile.skills = skills.clone();
        }
        if let Some(projects) = &self.projects {
            profile.projects = projects.clone();
        }
        if let Some(socials) = &self.socials {
            profile.socials = socials.clone();
        }
        if let Some(picture) = &self.profile_picture {
            profile.profile_picture = Some(picture.clone());
        }
        profile.updated_at = chrono::Utc::now().naive_utc();
    }
}

/// Response containing a stored profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile_id: Uuid,
    pub full_name: String,
    pub profession: Option<String>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub socials: Vec<Social>,
    pub profile_picture: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            profile_id: profile.profile_id,
            full_name: profile.full_name,
            profession: profile.profession,
            skills: profile.skills,
            projects: profile.projects,
            socials: profile.socials,
            profile_picture: profile.profile_picture,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
