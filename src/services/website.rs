//! # Website Service
//!
//! Wedding microsite settings: slug validation and uniqueness, URL generation
//! from the configured base URL, and the visitor password gate.

use std::sync::LazyLock;

use rand::{Rng, distributions::Alphanumeric};
use regex::Regex;
use sea_orm::ConnectionTrait;
use url::Url;
use uuid::Uuid;

use crate::auth::secrets_match;
use crate::error::{ApiError, conflict, unauthorized, validation_error};
use crate::models::inputs::{FieldErrors, UpdateWebsiteInput};
use crate::models::website;
use crate::models::{user, views::WebsiteView};
use crate::repositories::WebsiteRepository;

static SUB_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]{3,63}$").expect("Invalid regex"));

const SLUG_SUFFIX_LEN: usize = 4;
const SLUG_ATTEMPTS: usize = 5;

/// Whether `sub_url` is an acceptable website slug
pub fn is_valid_sub_url(sub_url: &str) -> bool {
    SUB_URL_PATTERN.is_match(sub_url) && !sub_url.starts_with('-') && !sub_url.ends_with('-')
}

/// Public URL of a website: the base URL with the slug as its last path segment
pub fn website_url(base_url: &str, sub_url: &str) -> Result<String, ApiError> {
    let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).map_err(|err| {
        tracing::error!(error = %err, base_url, "Website base URL is not a valid URL");
        crate::error::internal_error("Website base URL is misconfigured")
    })?;
    let url = base.join(sub_url).map_err(|err| {
        tracing::error!(error = %err, sub_url, "Failed to build website URL");
        crate::error::internal_error("Failed to build website URL")
    })?;
    Ok(url.to_string())
}

/// Lowercase the couple's first names into a slug, e.g. `jane-and-john`
pub fn slug_from_names(user: &user::Model) -> String {
    let raw = format!("{} and {}", user.bride_first_name, user.groom_first_name);
    let mut slug = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-').to_string();
    if slug.len() < 3 {
        "our-wedding".to_string()
    } else {
        slug.chars().take(50).collect::<String>().trim_end_matches('-').to_string()
    }
}

/// Constant-time password check; open websites accept any visitor
pub fn check_password(website: &website::Model, provided: Option<&str>) -> bool {
    if !website.is_password_enabled {
        return true;
    }
    match (website.password.as_deref(), provided) {
        (Some(expected), Some(provided)) => secrets_match(provided, expected),
        _ => false,
    }
}

/// Load a website for a visitor, enforcing the password when enabled
pub async fn find_public<C: ConnectionTrait>(
    db: &C,
    sub_url: &str,
    password: Option<&str>,
) -> Result<website::Model, ApiError> {
    let website = WebsiteRepository::new(db)
        .find_by_sub_url(&sub_url.to_lowercase())
        .await?
        .ok_or_else(|| crate::error::not_found("Website", sub_url))?;

    if !check_password(&website, password) {
        return Err(unauthorized(Some("Website password required")));
    }
    Ok(website)
}

pub struct WebsiteService<'a, C: ConnectionTrait> {
    db: &'a C,
    base_url: &'a str,
}

impl<'a, C: ConnectionTrait> WebsiteService<'a, C> {
    pub fn new(db: &'a C, base_url: &'a str) -> Self {
        Self { db, base_url }
    }

    /// Create the website for a freshly onboarded user
    pub async fn create_for_user(
        &self,
        user: &user::Model,
        requested_sub_url: Option<&str>,
    ) -> Result<website::Model, ApiError> {
        let repo = WebsiteRepository::new(self.db);

        let sub_url = match requested_sub_url.map(str::trim).filter(|s| !s.is_empty()) {
            Some(requested) => {
                let requested = requested.to_lowercase();
                self.ensure_sub_url_available(&requested, None).await?;
                requested
            }
            None => self.generate_sub_url(user).await?,
        };

        let url = website_url(self.base_url, &sub_url)?;
        Ok(repo.create(user.id, &sub_url, &url).await?)
    }

    pub async fn get_for_user(&self, user_id: Uuid) -> Result<website::Model, ApiError> {
        WebsiteRepository::new(self.db)
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| crate::error::not_found("Website", user_id))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        input: &UpdateWebsiteInput,
    ) -> Result<WebsiteView, ApiError> {
        let mut website = self.get_for_user(user_id).await?;

        if let Some(sub_url) = input.sub_url.as_deref() {
            let sub_url = sub_url.trim().to_lowercase();
            if sub_url != website.sub_url {
                self.ensure_sub_url_available(&sub_url, Some(website.id))
                    .await?;
                website.url = website_url(self.base_url, &sub_url)?;
                website.sub_url = sub_url;
            }
        }

        if let Some(password) = input.password.as_deref() {
            website.password = Some(password.to_string()).filter(|p| !p.is_empty());
        }
        if let Some(enabled) = input.is_password_enabled {
            website.is_password_enabled = enabled;
        }
        if website.is_password_enabled && website.password.is_none() {
            let mut errors = FieldErrors::new();
            errors.add("password", "a password is required to enable protection");
            return Err(errors.into());
        }
        if let Some(enabled) = input.is_rsvp_enabled {
            website.is_rsvp_enabled = enabled;
        }
        if let Some(cover) = input.cover_photo_url.as_deref() {
            website.cover_photo_url = Some(cover.trim().to_string()).filter(|c| !c.is_empty());
        }

        let website = WebsiteRepository::new(self.db).update(website).await?;
        tracing::info!(%user_id, sub_url = %website.sub_url, "Updated website settings");
        Ok(website.into())
    }

    async fn ensure_sub_url_available(
        &self,
        sub_url: &str,
        except_website: Option<Uuid>,
    ) -> Result<(), ApiError> {
        if !is_valid_sub_url(sub_url) {
            return Err(validation_error(
                "Invalid website address",
                serde_json::json!({
                    "sub_url": "must be 3-63 lowercase letters, digits or hyphens"
                }),
            ));
        }
        if WebsiteRepository::new(self.db)
            .sub_url_taken(sub_url, except_website)
            .await?
        {
            return Err(conflict("Website address is already taken")
                .with_details(serde_json::json!({ "sub_url": sub_url })));
        }
        Ok(())
    }

    async fn generate_sub_url(&self, user: &user::Model) -> Result<String, ApiError> {
        let repo = WebsiteRepository::new(self.db);
        let base = slug_from_names(user);
        if !repo.sub_url_taken(&base, None).await? {
            return Ok(base);
        }

        for _ in 0..SLUG_ATTEMPTS {
            let suffix: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(SLUG_SUFFIX_LEN)
                .map(|c| (c as char).to_ascii_lowercase())
                .collect();
            let candidate = format!("{base}-{suffix}");
            if !repo.sub_url_taken(&candidate, None).await? {
                return Ok(candidate);
            }
        }

        Err(conflict("Could not find a free website address; choose one explicitly"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(bride: &str, groom: &str) -> user::Model {
        user::Model {
            id: Uuid::new_v4(),
            email: None,
            groom_first_name: groom.to_string(),
            groom_last_name: "Doe".to_string(),
            bride_first_name: bride.to_string(),
            bride_last_name: "Roe".to_string(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn website(password: Option<&str>, enabled: bool) -> website::Model {
        website::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            sub_url: "jane-and-john".to_string(),
            url: "http://localhost:3000/jane-and-john".to_string(),
            password: password.map(str::to_string),
            is_password_enabled: enabled,
            is_rsvp_enabled: true,
            cover_photo_url: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn sub_url_rules() {
        assert!(is_valid_sub_url("jane-and-john"));
        assert!(is_valid_sub_url("abc"));
        assert!(!is_valid_sub_url("ab"));
        assert!(!is_valid_sub_url("Jane"));
        assert!(!is_valid_sub_url("-jane"));
        assert!(!is_valid_sub_url("jane_john"));
        assert!(!is_valid_sub_url(&"a".repeat(64)));
    }

    #[test]
    fn url_joins_base_and_slug() {
        assert_eq!(
            website_url("https://weddings.example.com", "jane-and-john").unwrap(),
            "https://weddings.example.com/jane-and-john"
        );
        assert_eq!(
            website_url("https://example.com/w/", "ana-y-luis").unwrap(),
            "https://example.com/w/ana-y-luis"
        );
    }

    #[test]
    fn slug_uses_first_names() {
        assert_eq!(slug_from_names(&user("Jane", "John")), "jane-and-john");
        assert_eq!(slug_from_names(&user("Zoë", "Al")), "zo-and-al");
    }

    #[test]
    fn password_gate() {
        assert!(check_password(&website(None, false), None));

        let protected = website(Some("forever"), true);
        assert!(!check_password(&protected, None));
        assert!(!check_password(&protected, Some("never")));
        assert!(check_password(&protected, Some("forever")));

        // Enabled without a stored password locks everyone out
        assert!(!check_password(&website(None, true), Some("")));
    }
}
