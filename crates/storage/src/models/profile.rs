use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::profile::CreateProfileRequest;

/// A project entry on a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub name: String,
    pub link: String,
}

/// A social media entry on a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Social {
    pub platform: String,
    pub link: String,
}

/// The single entity this service manages. `profile_picture`, when set, holds the
/// generated filename of a blob in the picture store; the reference is checked at
/// the time it is set but may dangle afterwards if the blob is removed externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
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

impl Profile {
    /// Builds a new record from a create request, assigning a fresh id and both
    /// timestamps. The id is immutable for the lifetime of the record.
    pub fn from_request(req: &CreateProfileRequest) -> Self {
        let now = chrono::Utc::now().naive_utc();

        Self {
            profile_id: Uuid::new_v4(),
            full_name: req.full_name.clone(),
            profession: req.profession.clone(),
            skills: req.skills.clone(),
            projects: req.projects.clone(),
            socials: req.socials.clone(),
            profile_picture: req.profile_picture.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}
