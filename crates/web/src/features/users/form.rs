use axum::body::Bytes;
use axum::extract::Multipart;
use serde::de::DeserializeOwned;
use storage::dto::profile::{CreateProfileRequest, UpdateProfileRequest};
use storage::models::{Project, Social};

use crate::error::ErrorKind;

/// An uploaded `profilePicture` part, held in memory until the picture store
/// accepts or rejects it.
pub struct UploadedPicture {
    pub bytes: Bytes,
    pub file_name: Option<String>,
    pub content_type: String,
}

/// Decoded multipart form for create/update requests. The list-valued fields
/// arrive as JSON-encoded strings and must parse as their exact shapes; a
/// malformed sub-list rejects the whole request rather than being passed
/// through half-parsed.
#[derive(Default)]
pub struct ProfileForm {
    pub full_name: Option<String>,
    pub profession: Option<String>,
    pub skills: Option<Vec<String>>,
    pub projects: Option<Vec<Project>>,
    pub socials: Option<Vec<Social>>,
    pub picture: Option<UploadedPicture>,
}

impl ProfileForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ErrorKind> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            match field.name() {
                Some("fullName") => form.full_name = Some(field.text().await?),
                Some("profession") => form.profession = Some(field.text().await?),
                Some("skills") => {
                    form.skills = Some(parse_json_field("skills", &field.text().await?)?)
                }
                Some("projects") => {
                    form.projects = Some(parse_json_field("projects", &field.text().await?)?)
                }
                Some("socials") => {
                    form.socials = Some(parse_json_field("socials", &field.text().await?)?)
                }
                Some("profilePicture") => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let file_name = field.file_name().map(str::to_string);
                    form.picture = Some(UploadedPicture {
                        content_type,
                        file_name,
                        bytes: field.bytes().await?,
                    });
                }
                // Unknown parts are ignored.
                _ => {}
            }
        }

        Ok(form)
    }

    pub fn into_create_request(self, profile_picture: Option<String>) -> CreateProfileRequest {
        CreateProfileRequest {
            full_name: self.full_name.unwrap_or_default(),
            profession: self.profession,
            skills: self.skills.unwrap_or_default(),
            projects: self.projects.unwrap_or_default(),
            socials: self.socials.unwrap_or_default(),
            profile_picture,
        }
    }

    pub fn into_update_request(self, profile_picture: Option<String>) -> UpdateProfileRequest {
        UpdateProfileRequest {
            full_name: self.full_name,
            profession: self.profession,
            skills: self.skills,
            projects: self.projects,
            socials: self.socials,
            profile_picture,
        }
    }
}

fn parse_json_field<T: DeserializeOwned>(name: &str, raw: &str) -> Result<T, ErrorKind> {
    serde_json::from_str(raw)
        .map_err(|e| ErrorKind::BadRequest(format!("Field `{name}` is not valid JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_field_typed_shapes() {
        let skills: Vec<String> = parse_json_field("skills", r#"["rust","sql"]"#).unwrap();
        assert_eq!(skills, vec!["rust".to_string(), "sql".to_string()]);

        let projects: Vec<Project> =
            parse_json_field("projects", r#"[{"name":"site","link":"https://x"}]"#).unwrap();
        assert_eq!(projects[0].name, "site");
    }

    #[test]
    fn test_parse_json_field_fails_closed() {
        // Valid JSON of the wrong shape is rejected too, not coerced.
        let err = parse_json_field::<Vec<String>>("skills", r#"{"not":"a list"}"#).unwrap_err();
        assert!(matches!(err, ErrorKind::BadRequest(_)));

        let err = parse_json_field::<Vec<String>>("skills", "rust,sql").unwrap_err();
        assert!(matches!(err, ErrorKind::BadRequest(_)));
    }
}
