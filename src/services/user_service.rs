use serde::Deserialize;

use crate::{database::DbHandle, models::User, utils::AppError};

// Request structures
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct LoginForm {
    pub id: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, utoipa::IntoParams, utoipa::ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AddUserForm {
    pub id: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

impl AddUserForm {
    /// Body values win; the query string fills in whatever the body left
    /// out or sent empty.
    pub fn or(self, fallback: AddUserForm) -> AddUserForm {
        AddUserForm {
            id: pick(self.id, fallback.id),
            password: pick(self.password, fallback.password),
            name: pick(self.name, fallback.name),
        }
    }
}

/// An empty body value only stands when the query has nothing either.
fn pick(body: Option<String>, query: Option<String>) -> Option<String> {
    match body {
        Some(value) if value.is_empty() => query.or(Some(value)),
        Some(value) => Some(value),
        None => query,
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::InvalidRequest(format!("missing field '{}'", field)))
}

/// Matches on id AND password. Returns the first matching user, if any.
pub async fn login(db: &DbHandle, form: LoginForm) -> Result<Option<User>, AppError> {
    let store = db.store()?;

    let id = required(form.id, "id")?;
    let password = required(form.password, "password")?;

    let mut users = store.find_by_credentials(&id, &password).await?;

    if users.is_empty() {
        log::warn!("Cannot find matched user for id [{}]", id);
        return Ok(None);
    }

    log::info!("Matched user id [{}] ({} record(s))", id, users.len());
    Ok(Some(users.swap_remove(0)))
}

/// Inserts the user as given. Repeated ids are accepted.
pub async fn add_user(db: &DbHandle, form: AddUserForm) -> Result<usize, AppError> {
    let store = db.store()?;

    let user = User::new(
        required(form.id, "id")?,
        required(form.password, "password")?,
        required(form.name, "name")?,
    );

    let inserted = store.insert_user(&user).await?;

    if inserted > 0 {
        log::info!("Added user record(s): {}", inserted);
    } else {
        log::error!("No user record inserted for id [{}]", user.id);
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::database::memory::MemoryUserStore;

    fn login_form(id: &str, password: &str) -> LoginForm {
        LoginForm {
            id: Some(id.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn add_form(id: &str, password: &str, name: &str) -> AddUserForm {
        AddUserForm {
            id: Some(id.to_string()),
            password: Some(password.to_string()),
            name: Some(name.to_string()),
        }
    }

    fn connected(store: MemoryUserStore) -> (DbHandle, Arc<MemoryUserStore>) {
        let store = Arc::new(store);
        let handle = DbHandle::new();
        handle.connect(store.clone()).unwrap();
        (handle, store)
    }

    #[tokio::test]
    async fn test_login_requires_connection() {
        let result = login(&DbHandle::new(), login_form("alice", "pw")).await;
        assert!(matches!(result, Err(AppError::DatabaseUnavailable)));
    }

    #[tokio::test]
    async fn test_login_checks_password() {
        let (db, _) = connected(MemoryUserStore::with_users(vec![User::new("alice", "pw", "Alice")]));

        let user = login(&db, login_form("alice", "pw")).await.unwrap();
        assert_eq!(user.map(|u| u.name), Some("Alice".to_string()));

        assert!(login(&db, login_form("alice", "not-the-password")).await.unwrap().is_none());
        assert!(login(&db, login_form("bob", "pw")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_missing_field() {
        let (db, _) = connected(MemoryUserStore::default());
        let form = LoginForm {
            id: Some("alice".to_string()),
            password: None,
        };

        assert!(matches!(login(&db, form).await, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_duplicate_registration_creates_two_records() {
        let (db, store) = connected(MemoryUserStore::default());

        assert_eq!(add_user(&db, add_form("alice", "pw1", "Alice")).await.unwrap(), 1);
        assert_eq!(add_user(&db, add_form("alice", "pw2", "Alice Again")).await.unwrap(), 1);

        assert_eq!(store.count_with_id("alice"), 2);
    }

    #[tokio::test]
    async fn test_add_user_accepts_empty_values() {
        let (db, store) = connected(MemoryUserStore::default());

        assert_eq!(add_user(&db, add_form("", "", "")).await.unwrap(), 1);
        assert_eq!(store.count_with_id(""), 1);
    }

    #[tokio::test]
    async fn test_add_user_surfaces_store_errors() {
        let (db, _) = connected(MemoryUserStore::failing());
        let result = add_user(&db, add_form("alice", "pw", "Alice")).await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[test]
    fn test_body_values_take_precedence_over_query() {
        let body = AddUserForm {
            id: Some("from-body".to_string()),
            password: None,
            name: None,
        };
        let merged = body.or(add_form("from-query", "query-pw", "Query Name"));

        assert_eq!(merged.id.as_deref(), Some("from-body"));
        assert_eq!(merged.password.as_deref(), Some("query-pw"));
        assert_eq!(merged.name.as_deref(), Some("Query Name"));

        let body = AddUserForm {
            id: Some(String::new()),
            password: Some("pw".to_string()),
            name: Some("B".to_string()),
        };
        let query = AddUserForm {
            id: Some("bob".to_string()),
            ..AddUserForm::default()
        };
        let merged = body.or(query);

        assert_eq!(merged.id.as_deref(), Some("bob"));
        assert_eq!(merged.password.as_deref(), Some("pw"));

        let merged = add_form("", "", "").or(AddUserForm::default());
        assert_eq!(merged.id.as_deref(), Some(""));
    }
}
