//! Integration tests for the registration flow.

use std::sync::{Arc, Mutex};

use permit_core::error::{PermitError, PermitResult};
use permit_core::models::user::{RegisterUser, RenamedUser, User};
use permit_core::repository::UserRepository;
use permit_service::service::RegistrationService;

#[derive(Clone, Default)]
struct MemoryUsers {
    users: Arc<Mutex<Vec<User>>>,
}

impl UserRepository for MemoryUsers {
    async fn register(&self, input: RegisterUser) -> PermitResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = User {
            user_id: users.len() as i64 + 1,
            line_user_id: input.line_user_id,
            company_name: input.company_name,
            department: input.department,
            full_name: input.full_name,
            phone_number: input.phone_number,
            email: input.email,
            is_admin: false,
            is_active: true,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn get_by_line_id(&self, line_user_id: &str) -> PermitResult<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.line_user_id == line_user_id)
            .cloned()
            .ok_or_else(|| PermitError::not_found("User", line_user_id))
    }

    async fn update_full_name(&self, user_id: i64, full_name: &str) -> PermitResult<RenamedUser> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| PermitError::not_found("User", user_id))?;
        user.full_name = full_name.to_string();
        Ok(RenamedUser {
            user_id,
            full_name: full_name.to_string(),
            updated_date: None,
        })
    }
}

fn registration(line_user_id: &str) -> RegisterUser {
    RegisterUser {
        line_user_id: line_user_id.into(),
        company_name: "Acme Co".into(),
        department: None,
        full_name: "Somchai".into(),
        phone_number: "0812345678".into(),
        email: Some("somchai@acme.co.th".into()),
    }
}

#[tokio::test]
async fn unknown_user_resolves_to_none_then_registers() {
    let service = RegistrationService::new(MemoryUsers::default());

    assert!(service.resolve("U1").await.unwrap().is_none());
    let user = service.register(registration("U1")).await.unwrap();
    assert_eq!(user.user_id, 1);

    let resolved = service.resolve("U1").await.unwrap().unwrap();
    assert_eq!(resolved.full_name, "Somchai");
}

#[tokio::test]
async fn invalid_registration_never_reaches_the_repository() {
    let users = MemoryUsers::default();
    let service = RegistrationService::new(users.clone());

    let mut input = registration("U1");
    input.phone_number = "12345".into();
    let err = service.register(input).await.unwrap_err();

    assert!(matches!(err, PermitError::Validation { .. }));
    assert!(users.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rename_requires_a_name() {
    let service = RegistrationService::new(MemoryUsers::default());
    let user = service.register(registration("U1")).await.unwrap();

    assert!(service.rename(user.user_id, "   ").await.is_err());
    let renamed = service.rename(user.user_id, "Somchai J.").await.unwrap();
    assert_eq!(renamed.full_name, "Somchai J.");
    assert_eq!(
        service.resolve("U1").await.unwrap().unwrap().full_name,
        "Somchai J."
    );
}
