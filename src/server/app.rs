use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{about, admin, blog, contact, health, projects, site_content};
use crate::services::auth_service::verifier_from_config;
use crate::services::catalog_service::Blog;
use crate::services::config_service::{Config, StorageBackend};
use crate::services::content_store::ContentStore;
use crate::services::dashboard::AdminDashboard;
use crate::services::project_repository::{
    InMemoryProjectRepository, JsonProjectRepository, ProjectRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ContentStore>,
    pub dashboard: Arc<Mutex<AdminDashboard>>,
    pub blog: Arc<Blog>,
    pub data_dir: PathBuf,
    pub contact_delay: Duration,
}

impl AppState {
    /// Wire the services for `data_dir` according to `config`.
    pub fn from_config(data_dir: &Path, config: &Config) -> Result<Self> {
        let store = Arc::new(ContentStore::in_dir(data_dir));

        let repository: Box<dyn ProjectRepository> = match config.storage {
            StorageBackend::Memory => {
                info!("Using in-memory project storage");
                Box::new(InMemoryProjectRepository::seeded())
            }
            StorageBackend::File => {
                info!("Using project storage under {}", data_dir.display());
                Box::new(JsonProjectRepository::open(data_dir, config.seed_projects)?)
            }
        };

        let verifier = verifier_from_config(
            config.admin_username.as_deref(),
            config.admin_password_hash.as_deref(),
        );
        let dashboard = AdminDashboard::new(repository, store.clone(), verifier)?;

        Ok(Self {
            store,
            dashboard: Arc::new(Mutex::new(dashboard)),
            blog: Arc::new(Blog::seeded()),
            data_dir: data_dir.to_path_buf(),
            contact_delay: config.contact_delay(),
        })
    }
}

pub async fn create_app(state: AppState, cors_origin: Option<&str>) -> Result<Router> {
    let cors = match cors_origin {
        Some(origin) if origin != "*" => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", public_routes())
        .nest("/api/admin", admin_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    Ok(app)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/site-content",
            get(site_content::get_site_content).post(site_content::post_site_content),
        )
        // Projects
        .route("/projects", get(projects::list_projects))
        .route("/projects/featured", get(projects::featured_projects))
        .route("/projects/:id", get(projects::get_project))
        // Blog
        .route("/blog", get(blog::list_posts))
        .route("/blog/featured", get(blog::featured_post))
        .route("/blog/categories", get(blog::list_categories))
        .route("/blog/:slug", get(blog::get_post))
        .route("/about", get(about::get_about))
        .route("/contact", post(contact::submit_contact))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/stats", get(admin::stats))
        // Categories
        .route("/categories", get(admin::list_categories).post(admin::add_category))
        .route(
            "/categories/:index",
            put(admin::rename_category).delete(admin::delete_category),
        )
        // Projects
        .route("/projects", get(admin::list_projects).post(admin::create_project))
        .route(
            "/projects/:id",
            put(admin::update_project).delete(admin::delete_project),
        )
        .route("/projects/:id/featured", post(admin::toggle_featured))
        .route("/projects/:id/images", post(admin::upload_images))
        // Site content draft
        .route(
            "/site-content",
            get(admin::get_site_content_draft).put(admin::put_site_content_draft),
        )
        .route("/site-content/reload", post(admin::reload_site_content))
        .route("/site-content/publish", post(admin::publish_site_content))
        .route(
            "/site-content/milestones/:index/up",
            post(admin::move_milestone_up),
        )
        .route(
            "/site-content/milestones/:index/down",
            post(admin::move_milestone_down),
        )
}
