//! Registration and profile maintenance.

use permit_core::error::{PermitError, PermitResult};
use permit_core::models::user::{RegisterUser, RenamedUser, User};
use permit_core::repository::UserRepository;
use tracing::info;

use crate::error::ServiceError;

pub struct RegistrationService<U: UserRepository> {
    user_repo: U,
}

impl<U: UserRepository> RegistrationService<U> {
    pub fn new(user_repo: U) -> Self {
        Self { user_repo }
    }

    /// The user bound to a chat-login id, or `None` if they still have to
    /// register.
    pub async fn resolve(&self, line_user_id: &str) -> PermitResult<Option<User>> {
        match self.user_repo.get_by_line_id(line_user_id).await {
            Ok(user) => Ok(Some(user)),
            Err(PermitError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn register(&self, input: RegisterUser) -> PermitResult<User> {
        validate_registration(&input)?;
        let user = self.user_repo.register(input).await?;
        info!(user_id = user.user_id, "Registration completed");
        Ok(user)
    }

    pub async fn rename(&self, user_id: i64, full_name: &str) -> PermitResult<RenamedUser> {
        if full_name.trim().is_empty() {
            return Err(ServiceError::MissingField("full name").into());
        }
        self.user_repo.update_full_name(user_id, full_name).await
    }
}

fn validate_registration(input: &RegisterUser) -> Result<(), ServiceError> {
    if input.line_user_id.trim().is_empty() {
        return Err(ServiceError::MissingField("LINE user id"));
    }
    if input.company_name.trim().is_empty() {
        return Err(ServiceError::MissingField("company name"));
    }
    if input.full_name.trim().is_empty() {
        return Err(ServiceError::MissingField("full name"));
    }
    if input.phone_number.trim().chars().count() < 10 {
        return Err(ServiceError::PhoneTooShort);
    }
    if let Some(email) = input.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
        && !looks_like_email(email)
    {
        return Err(ServiceError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RegisterUser {
        RegisterUser {
            line_user_id: "U123".into(),
            company_name: "Acme Co".into(),
            department: None,
            full_name: "Somchai".into(),
            phone_number: "0812345678".into(),
            email: None,
        }
    }

    #[test]
    fn accepts_minimal_registration() {
        assert!(validate_registration(&input()).is_ok());
    }

    #[test]
    fn rejects_short_phone() {
        let mut i = input();
        i.phone_number = "081234567".into();
        assert!(matches!(validate_registration(&i), Err(ServiceError::PhoneTooShort)));
    }

    #[test]
    fn blank_email_is_ignored_but_malformed_is_not() {
        let mut i = input();
        i.email = Some("  ".into());
        assert!(validate_registration(&i).is_ok());
        i.email = Some("somchai@acme".into());
        assert!(matches!(validate_registration(&i), Err(ServiceError::InvalidEmail(_))));
        i.email = Some("somchai@acme.co.th".into());
        assert!(validate_registration(&i).is_ok());
    }

    #[test]
    fn company_is_required() {
        let mut i = input();
        i.company_name = " ".into();
        assert!(matches!(
            validate_registration(&i),
            Err(ServiceError::MissingField("company name"))
        ));
    }
}
