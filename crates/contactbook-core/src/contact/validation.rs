use crate::{Field, Validate, ValidationError, is_blank};

use super::ContactValues;

const MAX_FULLNAME_LEN: usize = 200;

impl Validate for ContactValues {
    fn validate(&self) -> Result<(), ValidationError> {
        let fullname = self.fullname.trim();
        if fullname.is_empty() {
            return Err(ValidationError::FieldEmpty(Field::FullName));
        }
        if fullname.chars().count() > MAX_FULLNAME_LEN {
            return Err(ValidationError::FieldInvalid(Field::FullName));
        }

        if is_blank(&self.photo) {
            return Err(ValidationError::FieldEmpty(Field::Photo));
        }
        if let Some(ref photo) = self.photo {
            validate_photo_url(photo)?;
        }

        validate_mobile(&self.mobile)?;

        if self.email.trim().is_empty() {
            return Err(ValidationError::FieldEmpty(Field::Email));
        }
        if !email_address::EmailAddress::is_valid(self.email.trim()) {
            return Err(ValidationError::FieldInvalid(Field::Email));
        }

        if self.job.trim().is_empty() {
            return Err(ValidationError::FieldEmpty(Field::Job));
        }

        Ok(())
    }
}

fn validate_photo_url(photo: &str) -> Result<(), ValidationError> {
    match url::Url::parse(photo.trim()) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(ValidationError::FieldInvalid(Field::Photo)),
    }
}

fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    let mobile = mobile.trim();
    if mobile.is_empty() {
        return Err(ValidationError::FieldEmpty(Field::Mobile));
    }
    let digits = mobile.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = mobile
        .char_indices()
        .all(|(i, c)| c.is_ascii_digit() || c == ' ' || c == '-' || (c == '+' && i == 0));
    if !allowed || digits < 5 {
        return Err(ValidationError::FieldInvalid(Field::Mobile));
    }
    Ok(())
}
