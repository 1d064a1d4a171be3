pub mod serve;

// re-export
pub use serve::{build_router, serve};

use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{config::AppConfig, database::DbManager, web::OriginFilter, Result};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    /// Builds the pool, makes sure the schema exists and binds the listener.
    /// Any failure here means the server must not start.
    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let dm = DbManager::init(&config.db_config)?;
        dm.ensure_schema().await?;

        let origin_filter = OriginFilter::new(config.allowed_origins);
        if origin_filter.is_permissive() {
            info!("{:<20} - accepting requests from any origin", "origin_filter");
        }
        let app_state = AppState::new(dm, origin_filter);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub database_mgr: DbManager,
    pub origin_filter: OriginFilter,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(database_mgr: DbManager, origin_filter: OriginFilter) -> Self {
        AppState(Arc::new(InternalState {
            database_mgr,
            origin_filter,
        }))
    }
}
