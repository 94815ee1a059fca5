use axum::extract::{DefaultBodyLimit, FromRef};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::api::records::{
    create_handler, delete_handler, get_handler, list_handler, reorder_handler, update_handler,
};
use crate::api::{dropdowns, galleries, upload};
use crate::auth::handlers::{login_handler, logout_handler, session_handler};
use crate::auth::middleware::{csrf_protect, require_admin};
use crate::db::collection::Collection;
use crate::db::models::{Blog, Event, Gallery, Objective, SliderImage};
use crate::db::record::Record;
use crate::state::AppState;

/// Name of the admin session cookie.
pub const SESSION_COOKIE_NAME: &str = "admin_session";

/// How long an unused session cookie survives. The much shorter admin
/// inactivity timeout is enforced separately by the session manager.
const COOKIE_INACTIVITY: time::Duration = time::Duration::hours(24);

/// Build the full application router.
pub fn build_router(state: AppState, cookie_secure: bool) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_http_only(true)
        .with_same_site(SameSite::Strict)
        .with_secure(cookie_secure)
        .with_expiry(Expiry::OnInactivity(COOKIE_INACTIVITY));

    Router::new()
        .route("/admin/login", post(login_handler))
        .route("/admin/logout", post(logout_handler))
        .merge(public_routes())
        .merge(admin_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(session_layer)
                .layer(DefaultBodyLimit::max(state.max_upload_bytes)),
        )
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    let router = Router::new()
        .route("/api/slider", get(list_handler::<SliderImage>))
        .route("/api/objectives", get(list_handler::<Objective>))
        .route("/api/videos-dropdown", get(dropdowns::get_videos_handler))
        .route("/api/navbar-dropdowns", get(dropdowns::get_navbar_handler))
        .route("/uploads/{filename}", get(upload::serve_upload_handler));

    let router = public_record_routes::<Blog>(router, "blogs");
    let router = public_record_routes::<Event>(router, "events");
    public_record_routes::<Gallery>(router, "galleries")
}

fn public_record_routes<R>(router: Router<AppState>, resource: &str) -> Router<AppState>
where
    R: Record,
    Collection<R>: FromRef<AppState>,
{
    router
        .route(&format!("/api/{resource}"), get(list_handler::<R>))
        .route(&format!("/api/{resource}/{{id}}"), get(get_handler::<R>))
}

fn admin_record_routes<R>(router: Router<AppState>, resource: &str) -> Router<AppState>
where
    R: Record,
    Collection<R>: FromRef<AppState>,
{
    router
        .route(&format!("/admin/api/{resource}"), post(create_handler::<R>))
        .route(
            &format!("/admin/api/{resource}/reorder"),
            post(reorder_handler::<R>),
        )
        .route(
            &format!("/admin/api/{resource}/{{id}}"),
            put(update_handler::<R>).delete(delete_handler::<R>),
        )
}

/// Everything behind the session guard and, for writes, the CSRF guard.
fn admin_routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/admin/session", get(session_handler))
        .route("/admin/api/upload", post(upload::upload_image_handler))
        .route(
            "/admin/api/galleries/{id}/photos",
            post(galleries::add_photo_handler),
        )
        .route(
            "/admin/api/galleries/{id}/photos/reorder",
            post(galleries::reorder_photos_handler),
        )
        .route(
            "/admin/api/galleries/{id}/photos/{photo_id}",
            axum::routing::delete(galleries::delete_photo_handler),
        )
        .merge(videos_dropdown_routes())
        .merge(navbar_dropdown_routes());

    let router = admin_record_routes::<Blog>(router, "blogs");
    let router = admin_record_routes::<Event>(router, "events");
    let router = admin_record_routes::<Gallery>(router, "galleries");
    let router = admin_record_routes::<SliderImage>(router, "slider");
    let router = admin_record_routes::<Objective>(router, "objectives");

    // Layers run outside-in: session guard first, then CSRF.
    router
        .route_layer(from_fn_with_state(state.clone(), csrf_protect))
        .route_layer(from_fn_with_state(state, require_admin))
}

fn videos_dropdown_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/api/videos-dropdown/categories",
            post(dropdowns::add_category_handler),
        )
        .route(
            "/admin/api/videos-dropdown/categories/reorder",
            post(dropdowns::reorder_categories_handler),
        )
        .route(
            "/admin/api/videos-dropdown/categories/{id}",
            put(dropdowns::update_category_handler).delete(dropdowns::delete_category_handler),
        )
        .route(
            "/admin/api/videos-dropdown/links",
            post(dropdowns::add_link_handler),
        )
        .route(
            "/admin/api/videos-dropdown/links/reorder",
            post(dropdowns::reorder_links_handler),
        )
        .route(
            "/admin/api/videos-dropdown/links/{id}",
            put(dropdowns::update_link_handler).delete(dropdowns::delete_link_handler),
        )
        .route(
            "/admin/api/videos-dropdown/social-media",
            put(dropdowns::update_videos_social_handler),
        )
}

fn navbar_dropdown_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/api/navbar-dropdowns/reorder",
            post(dropdowns::reorder_dropdowns_handler),
        )
        .route(
            "/admin/api/navbar-dropdowns/social-media",
            put(dropdowns::update_navbar_social_handler),
        )
        .route(
            "/admin/api/navbar-dropdowns/{nav_item}/enabled",
            put(dropdowns::set_enabled_handler),
        )
        .route(
            "/admin/api/navbar-dropdowns/{nav_item}/columns",
            post(dropdowns::add_column_handler),
        )
        .route(
            "/admin/api/navbar-dropdowns/{nav_item}/columns/reorder",
            post(dropdowns::reorder_columns_handler),
        )
        .route(
            "/admin/api/navbar-dropdowns/{nav_item}/columns/{column_id}",
            put(dropdowns::update_column_handler).delete(dropdowns::delete_column_handler),
        )
        .route(
            "/admin/api/navbar-dropdowns/{nav_item}/columns/{column_id}/items",
            post(dropdowns::add_item_handler),
        )
        .route(
            "/admin/api/navbar-dropdowns/{nav_item}/columns/{column_id}/items/reorder",
            post(dropdowns::reorder_items_handler),
        )
        .route(
            "/admin/api/navbar-dropdowns/{nav_item}/columns/{column_id}/items/{item_id}",
            put(dropdowns::update_item_handler).delete(dropdowns::delete_item_handler),
        )
}
