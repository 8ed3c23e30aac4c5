use chrono::NaiveDateTime;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::dto::profile::{CreateProfileRequest, UpdateProfileRequest};
use crate::error::{Result, StorageError};
use crate::models::{Profile, Project, Social};

/// Row shape for the `profiles` table; the list-valued fields live in JSONB
/// columns rather than join tables.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    profile_id: Uuid,
    full_name: String,
    profession: Option<String>,
    skills: Json<Vec<String>>,
    projects: Json<Vec<Project>>,
    socials: Json<Vec<Social>>,
    profile_picture: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            profile_id: row.profile_id,
            full_name: row.full_name,
            profession: row.profession,
            skills: row.skills.0,
            projects: row.projects.0,
            socials: row.socials.0,
            profile_picture: row.profile_picture,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT profile_id, full_name, profession, skills, projects, \
                              socials, profile_picture, created_at, updated_at FROM profiles";

pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all profiles in insertion order
    pub async fn list(&self) -> Result<Vec<Profile>> {
        let rows: Vec<ProfileRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} ORDER BY created_at"))
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    /// Find profile by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Profile> {
        let row: Option<ProfileRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE profile_id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        row.map(Profile::from).ok_or(StorageError::NotFound)
    }

    /// Create a new profile
    pub async fn create(&self, req: &CreateProfileRequest) -> Result<Profile> {
        let profile = Profile::from_request(req);
        self.insert(&profile).await?;
        Ok(profile)
    }

    /// Update an existing profile. Mirrors the flat-file store: read the full
    /// record, merge in memory, write the full row back.
    pub async fn update(&self, id: Uuid, req: &UpdateProfileRequest) -> Result<Profile> {
        let mut profile = self.find_by_id(id).await?;
        req.apply_to(&mut profile);

        sqlx::query(
            "UPDATE profiles SET full_name = $2, profession = $3, skills = $4, \
             projects = $5, socials = $6, profile_picture = $7, updated_at = $8 \
             WHERE profile_id = $1",
        )
        .bind(profile.profile_id)
        .bind(&profile.full_name)
        .bind(&profile.profession)
        .bind(Json(&profile.skills))
        .bind(Json(&profile.projects))
        .bind(Json(&profile.socials))
        .bind(&profile.profile_picture)
        .bind(profile.updated_at)
        .execute(self.pool)
        .await?;

        Ok(profile)
    }

    /// Delete a profile
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM profiles WHERE profile_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn insert(&self, profile: &Profile) -> Result<()> {
        sqlx::query(
            "INSERT INTO profiles (profile_id, full_name, profession, skills, projects, \
             socials, profile_picture, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(profile.profile_id)
        .bind(&profile.full_name)
        .bind(&profile.profession)
        .bind(Json(&profile.skills))
        .bind(Json(&profile.projects))
        .bind(Json(&profile.socials))
        .bind(&profile.profile_picture)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
