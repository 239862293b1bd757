use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Media Auth Server API",
        version = "1.0.0",
        description = "User login/registration backed by MongoDB and single-file video upload.\n\nAll `/process/*` endpoints answer with an HTML page and HTTP 200, success or not."
    ),
    paths(
        crate::api::auth::login,
        crate::api::auth::add_user,
        crate::api::upload::upload,
        crate::api::hls::hls_sample,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::user_service::LoginForm,
            crate::services::user_service::AddUserForm,
            crate::api::upload::UploadForm,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Login and registration against the `users` collection."),
        (name = "Upload", description = "Single-file multipart upload under field `fileTest`."),
        (name = "Media", description = "HLS placeholder endpoint."),
        (name = "Health", description = "Service and database status."),
    )
)]
pub struct ApiDoc;
