//! Form validation rules.
//!
//! Every `validate_*` function collects all field errors before failing so the
//! client can show them together.

use crate::domain::{CategoryDraft, LocationDraft, PostDraft, ProfileChanges};
use crate::error::{DomainError, FieldError};

pub const MAX_TITLE_LENGTH: usize = 256;
pub const MAX_SLUG_LENGTH: usize = 50;
pub const MAX_USERNAME_LENGTH: usize = 150;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Collects field errors for one form.
#[derive(Debug, Default)]
struct Errors(Vec<FieldError>);

impl Errors {
    fn check(&mut self, field: &'static str, result: Result<(), String>) {
        if let Err(message) = result {
            self.0.push(FieldError::new(field, message));
        }
    }

    fn finish(self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self.0))
        }
    }
}

fn required(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("This field is required".to_string());
    }
    Ok(())
}

fn short_text(value: &str, max: usize) -> Result<(), String> {
    required(value)?;
    if value.chars().count() > max {
        return Err(format!("Ensure this value has at most {max} characters"));
    }
    Ok(())
}

pub fn slug(value: &str) -> Result<(), String> {
    short_text(value, MAX_SLUG_LENGTH)?;
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(
            "Use only Latin letters, digits, hyphens and underscores".to_string(),
        );
    }
    Ok(())
}

pub fn username(value: &str) -> Result<(), String> {
    short_text(value, MAX_USERNAME_LENGTH)?;
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
    {
        return Err("Use only letters, digits and @/./+/-/_".to_string());
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), String> {
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err("Enter a valid email address".to_string()),
    }
}

/// Mask an email address so it can be logged without exposing it.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            if local.chars().count() > 1 {
                format!("{first}***@{domain}")
            } else {
                format!("***@{domain}")
            }
        }
        None => "***".to_string(),
    }
}

pub fn password(value: &str) -> Result<(), String> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_post(draft: &PostDraft) -> Result<(), DomainError> {
    let mut errors = Errors::default();
    errors.check("title", short_text(&draft.title, MAX_TITLE_LENGTH));
    errors.check("text", required(&draft.text));
    errors.finish()
}

pub fn validate_comment(text: &str) -> Result<(), DomainError> {
    let mut errors = Errors::default();
    errors.check("text", required(text));
    errors.finish()
}

pub fn validate_category(draft: &CategoryDraft) -> Result<(), DomainError> {
    let mut errors = Errors::default();
    errors.check("title", short_text(&draft.title, MAX_TITLE_LENGTH));
    errors.check("description", required(&draft.description));
    errors.check("slug", slug(&draft.slug));
    errors.finish()
}

pub fn validate_location(draft: &LocationDraft) -> Result<(), DomainError> {
    let mut errors = Errors::default();
    errors.check("name", short_text(&draft.name, MAX_TITLE_LENGTH));
    errors.finish()
}

pub fn validate_profile(changes: &ProfileChanges) -> Result<(), DomainError> {
    let mut errors = Errors::default();
    errors.check("username", username(&changes.username));
    errors.check("email", email(&changes.email));
    errors.finish()
}

pub fn validate_registration(name: &str, mail: &str, secret: &str) -> Result<(), DomainError> {
    let mut errors = Errors::default();
    errors.check("username", username(name));
    errors.check("email", email(mail));
    errors.check("password", password(secret));
    errors.finish()
}

/// Image formats accepted for post pictures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
}

impl ImageFormat {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            "image/bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Detect the format from the file signature.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            [b'B', b'M', ..] => Some(Self::Bmp),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Bmp => "bmp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
        }
    }
}

/// Check an uploaded image and return its format.
pub fn validate_image(
    content_type: &str,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<ImageFormat, DomainError> {
    if bytes.is_empty() {
        return Err(DomainError::invalid("image", "The submitted file is empty"));
    }
    if bytes.len() > max_bytes {
        return Err(DomainError::invalid(
            "image",
            format!("Images may not exceed {max_bytes} bytes"),
        ));
    }
    let declared = ImageFormat::from_content_type(content_type).ok_or_else(|| {
        DomainError::invalid("image", format!("Unsupported image type '{content_type}'"))
    })?;
    match ImageFormat::sniff(bytes) {
        Some(actual) if actual == declared => Ok(actual),
        _ => Err(DomainError::invalid(
            "image",
            "Upload a valid image. The file is either not an image or corrupted",
        )),
    }
}
