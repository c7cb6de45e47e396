//! Estado compartido de la consola
//!
//! Este módulo define el contexto de sesión y el estado que se pasa
//! explícitamente a los servicios.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::cache::cache_config::SESSION_KEY;
use crate::cache::LocalStore;
use crate::clients::PickupApiClient;
use crate::config::environment::EnvironmentConfig;
use crate::models::auth::Session;
use crate::services::status_policy::StatusPolicy;
use crate::utils::errors::{AppError, AppResult};

/// Contexto de sesión: único punto de lectura/escritura de la sesión
///
/// `establish` la fija una vez en el login y `clear` la borra entera en el
/// logout. La copia persistida es un único registro del store.
#[derive(Clone)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Session>>>,
    store: LocalStore,
}

impl SessionContext {
    pub fn new(store: LocalStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            store,
        }
    }

    /// Recupera la sesión persistida (si existe)
    pub async fn restore(&self) -> AppResult<Option<Session>> {
        let persisted: Option<Session> = self.store.get(SESSION_KEY).await?;
        let mut current = self.current.write().await;
        *current = persisted.clone();
        if let Some(session) = &persisted {
            info!("🔑 Sesión restaurada para '{}'", session.username);
        }
        Ok(persisted)
    }

    pub async fn establish(&self, session: Session) -> AppResult<()> {
        let mut current = self.current.write().await;
        self.store.set(SESSION_KEY, &session).await?;
        info!("🔑 Sesión establecida para '{}' ({} roles)", session.username, session.roles.len());
        *current = Some(session);
        Ok(())
    }

    pub async fn clear(&self) -> AppResult<()> {
        let mut current = self.current.write().await;
        self.store.remove(SESSION_KEY).await?;
        if current.take().is_some() {
            info!("🚪 Sesión cerrada");
        } else {
            warn!("🚪 Logout sin sesión activa");
        }
        Ok(())
    }

    /// Sesión actual o `NotAuthenticated`
    pub async fn current(&self) -> AppResult<Session> {
        self.current
            .read()
            .await
            .clone()
            .ok_or(AppError::NotAuthenticated)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub client: PickupApiClient,
    pub store: LocalStore,
    pub session: SessionContext,
    pub policy: StatusPolicy,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let client = PickupApiClient::new(&config)?;
        let store = LocalStore::new(config.store_path.clone());
        let session = SessionContext::new(store.clone());
        let policy = StatusPolicy::new(config.transition_mode);

        Ok(Self {
            config,
            client,
            store,
            session,
            policy,
        })
    }

    /// Crea el estado y restaura la sesión persistida
    pub async fn bootstrap(config: EnvironmentConfig) -> AppResult<Self> {
        let state = Self::new(config)?;
        state.session.restore().await?;
        Ok(state)
    }
}
