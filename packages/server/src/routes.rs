use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

/// Every endpoint, versioned under `/v1`.
pub fn api_routes() -> OpenApiRouter<AppState> {
    let v1 = OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/blogs", blog_routes());

    OpenApiRouter::new().nest("/v1", v1)
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::user::list_users,
        handlers::user::create_user
    ))
}

fn blog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::blog::list_blogs,
            handlers::blog::create_blog
        ))
        .routes(routes!(handlers::blog::blog_stats))
        .routes(routes!(
            handlers::blog::update_blog,
            handlers::blog::delete_blog
        ))
}
