use actix_web::{web, Either, HttpResponse};

use crate::database::DbHandle;
use crate::services::user_service::{self, AddUserForm, LoginForm};
use crate::utils::{html, AppError};

/// Form-encoded or JSON body, whichever the client sent
type Body<T> = Option<Either<web::Form<T>, web::Json<T>>>;

fn body_value<T>(body: Body<T>) -> Option<T> {
    body.map(|b| match b {
        Either::Left(form) => form.into_inner(),
        Either::Right(json) => json.into_inner(),
    })
}

#[utoipa::path(
    post,
    path = "/process/login",
    tag = "Auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login success or failure page", body = String, content_type = "text/html")
    )
)]
pub async fn login(db: web::Data<DbHandle>, body: Body<LoginForm>) -> HttpResponse {
    log::info!("Called /process/login");

    let form = body_value(body).unwrap_or_default();
    log::info!("Requested id [{}]", form.id.as_deref().unwrap_or_default());

    match user_service::login(&db, form).await {
        Ok(Some(user)) => {
            log::info!("✅ Login successful: {}", user.id);
            html::page(format!(
                "<h1>Login Success</h1><div><p>User ID : {}</p></div><div><p>User Name : {}</p></div>",
                html::escape(&user.id),
                html::escape(&user.name)
            ))
        }
        Ok(None) => html::page("<h1>Fail to LOGIN</h1>"),
        Err(AppError::DatabaseUnavailable) => {
            log::error!("❌ Login rejected: database is not connected");
            html::page("<h1>Fail to Connect DB</h1>")
        }
        Err(e) => {
            log::warn!("❌ Login failed: {}", e);
            html::page("<h1>Fail to LOGIN</h1>")
        }
    }
}

#[utoipa::path(
    post,
    path = "/process/addUser",
    tag = "Auth",
    params(AddUserForm),
    request_body(content = AddUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Registration success or failure page", body = String, content_type = "text/html")
    )
)]
pub async fn add_user(
    db: web::Data<DbHandle>,
    query: Option<web::Query<AddUserForm>>,
    body: Body<AddUserForm>,
) -> HttpResponse {
    log::info!("Called /process/addUser");

    let query = query.map(web::Query::into_inner).unwrap_or_default();
    let form = match body_value(body) {
        Some(body) => body.or(query),
        None => query,
    };

    log::info!(
        "Requested parameters: id [{}], name [{}]",
        form.id.as_deref().unwrap_or_default(),
        form.name.as_deref().unwrap_or_default()
    );

    match user_service::add_user(&db, form).await {
        Ok(inserted) if inserted > 0 => html::page("<h2>Success to User Add</h2>"),
        Ok(_) => html::page("<h2>Fail to User Add</h2>"),
        Err(AppError::DatabaseUnavailable) => {
            log::error!("❌ Registration rejected: database is not connected");
            html::page("<h2>Fail to Connect DB</h2>")
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {}", e);
            html::page("<h2>Fail to User Add</h2>")
        }
    }
}
