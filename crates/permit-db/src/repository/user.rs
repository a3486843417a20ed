//! Remote implementation of [`UserRepository`].

use permit_core::error::{PermitError, PermitResult};
use permit_core::models::user::{RegisterUser, RenamedUser, User};
use permit_core::repository::UserRepository;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::client::DataClient;
use crate::payload::{Params, insert_text, params};
use crate::response::rows;
use crate::transport::Transport;

const BY_LINE_ID: &str = "SELECT * FROM Users WHERE LineUserId = @LineUserId";

const RENAME: &str = "UPDATE [dbo].[Users]
SET [FullName] = @FullName,
    [UpdatedDate] = GETDATE()
WHERE [UserId] = @UserId;

SELECT [UserId], [FullName], [UpdatedDate]
FROM [dbo].[Users]
WHERE [UserId] = @UserId;";

pub struct RemoteUserRepository<T> {
    client: DataClient<T>,
}

impl<T: Transport> RemoteUserRepository<T> {
    pub fn new(client: DataClient<T>) -> Self {
        Self { client }
    }

    /// Lookup that always reaches the data service. Used right after a
    /// write, when a cached miss for the same id may still be fresh.
    async fn fetch_by_line_id(&self, line_user_id: &str) -> PermitResult<User> {
        let users: Vec<User> = self
            .client
            .query_rows_uncached(BY_LINE_ID, params(json!({ "LineUserId": line_user_id })))
            .await?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| PermitError::not_found("User", line_user_id))
    }
}

impl<T: Transport> UserRepository for RemoteUserRepository<T> {
    async fn register(&self, input: RegisterUser) -> PermitResult<User> {
        let mut parameters = params(json!({
            "LineUserId": input.line_user_id,
            "CompanyName": input.company_name.trim(),
            "FullName": input.full_name.trim(),
            "PhoneNumber": input.phone_number.trim(),
        }));
        insert_text(&mut parameters, "Department", input.department.as_deref());
        insert_text(&mut parameters, "Email", input.email.as_deref());

        let result = self.client.invoke("usp_RegisterUser", parameters).await?;

        // The procedure answers with the new row on most deployments; fall
        // back to a lookup when it returns only an id or nothing at all.
        let created = rows(result)
            .into_iter()
            .find_map(|row| serde_json::from_value::<User>(row).ok());
        match created {
            Some(user) => {
                info!(user_id = user.user_id, "User registered");
                Ok(user)
            }
            None => {
                debug!("Registration returned no user row, looking it up");
                self.fetch_by_line_id(&input.line_user_id).await
            }
        }
    }

    async fn get_by_line_id(&self, line_user_id: &str) -> PermitResult<User> {
        let users: Vec<User> = self
            .client
            .query_rows(BY_LINE_ID, params(json!({ "LineUserId": line_user_id })))
            .await?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| PermitError::not_found("User", line_user_id))
    }

    async fn update_full_name(&self, user_id: i64, full_name: &str) -> PermitResult<RenamedUser> {
        let mut parameters = Params::new();
        parameters.insert("UserId".into(), Value::from(user_id));
        parameters.insert("FullName".into(), Value::from(full_name.trim()));

        let renamed: Vec<RenamedUser> = self.client.query_rows_uncached(RENAME, parameters).await?;
        renamed
            .into_iter()
            .next()
            .ok_or_else(|| PermitError::not_found("User", user_id))
    }
}
