//! API routes, mounted under `/api`. Paths keep their trailing slash.
//! Static segments (`search`, `export`, `delete`, `add`) take priority over the id captures beside them.

use crate::handlers::{assignments, auth, comments, courses, enrollments, fetch, query, users};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

pub fn api_routes(state: AppState) -> Router {
    let upload_limit = state.settings.upload_limit_bytes;
    let uploads = Router::new()
        .route("/assignments/upload/", post(assignments::upload))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(upload_limit));

    Router::new()
        .route("/auth/login/", post(auth::login))
        .route("/auth/register/", post(auth::register))
        .route("/courses/", get(courses::list))
        .route("/courses/search/", get(courses::search))
        .route("/courses/:course_id/", get(courses::read))
        .route("/courses/:course_id/manage/", put(courses::update).delete(courses::delete))
        .route("/users/", get(users::list))
        .route("/users/export/", get(users::export))
        .route("/users/delete/", post(users::delete))
        .route("/users/:user_id/", get(users::profile))
        .route("/comments/add/", post(comments::add))
        .route("/comments/:course_id/", get(comments::list))
        .route("/enrollments/", post(enrollments::enroll))
        .route("/enrollments/:user_id/", get(enrollments::list_for_user))
        .route("/fetch/", post(fetch::fetch_resource))
        .route("/db/vulnerable-query/", post(query::execute))
        .merge(uploads)
        .with_state(state)
}
