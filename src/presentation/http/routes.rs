use super::{
    handlers::{
        admin, admin_blocked_ips, admin_posts, admin_reviews, auth, health, posts, reviews,
    },
    middleware::admin::require_admin,
    middleware::blocked_ip::blocked_ip_middleware,
    middleware::client_ip::client_ip_middleware,
    middleware::rate_limit::{rate_limit_middleware, review_rate_limit_middleware},
    middleware::request_id::request_id_middleware,
    middleware::tracker::track_visit_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/v1/admin/dashboard", get(admin::dashboard))
        .route("/api/v1/admin/tracker", get(admin::tracker_analytics))
        .route(
            "/api/v1/admin/moderation/preview",
            post(admin::moderation_preview),
        )
        .route("/api/v1/admin/posts", post(admin_posts::create_post))
        .route(
            "/api/v1/admin/posts/{id}",
            put(admin_posts::update_post).delete(admin_posts::delete_post),
        )
        .route("/api/v1/admin/reviews", get(admin_reviews::list_reviews))
        .route(
            "/api/v1/admin/reviews/{id}/approve",
            post(admin_reviews::approve_review),
        )
        .route(
            "/api/v1/admin/reviews/{id}",
            delete(admin_reviews::delete_review),
        )
        .route(
            "/api/v1/admin/blocked-ips",
            get(admin_blocked_ips::list_blocked_ips).post(admin_blocked_ips::block_ip),
        )
        .route(
            "/api/v1/admin/blocked-ips/{ip}",
            delete(admin_blocked_ips::unblock_ip),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let review_submission = Router::new()
        .route(
            "/api/v1/posts/{id}/reviews",
            post(reviews::submit_review),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            review_rate_limit_middleware,
        ));

    let public_routes = Router::new()
        // Posts
        .route("/api/v1/posts", get(posts::list_posts))
        .route("/api/v1/posts/{id}", get(posts::get_post))
        .route(
            "/api/v1/posts/{id}/reviews/{review_id}",
            delete(reviews::delete_own_review),
        )
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login_user))
        .route(
            "/api/v1/auth/me",
            get(auth::me).put(auth::update_me).delete(auth::delete_me),
        )
        .merge(review_submission)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            blocked_ip_middleware,
        ));

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Admin login (unprotected)
        .route("/api/v1/admin/login", post(admin::login))
        .merge(public_routes)
        // Admin (protected by JWT middleware)
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            track_visit_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            client_ip_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
