// region:    --- Imports
use auction_marketplace::app::{create_router, AppState};
use auction_marketplace::config::{AppConfig, ConfigError, StorageBackend};
use auction_marketplace::database::DatabaseManager;
use auction_marketplace::store::{
    AuctionStore, MemoryAuctionStore, MemoryUserStore, PgAuctionStore, PgUserStore, UserStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .without_time()
        .with_target(false)
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        error!("{:<12} --> 설정 로드 실패: {}", "Main", e);
        e
    })?;

    // 저장소 생성
    let (users, items, db_manager) = match config.storage {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let db_manager =
                Arc::new(DatabaseManager::connect(database_url, config.db_max_connections).await?);

            // 데이터베이스 초기화
            if let Err(e) = db_manager.initialize_database().await {
                error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
                return Err(e.into());
            }
            info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

            let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(Arc::clone(&db_manager)));
            let items: Arc<dyn AuctionStore> =
                Arc::new(PgAuctionStore::new(Arc::clone(&db_manager)));
            (users, items, Some(db_manager))
        }
        StorageBackend::Memory => {
            info!("{:<12} --> 메모리 저장소 사용", "Main");
            let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
            let items: Arc<dyn AuctionStore> = Arc::new(MemoryAuctionStore::new());
            (users, items, None)
        }
    };

    let state = AppState::new(
        users,
        items,
        &config.jwt_secret,
        config.update_mode,
        config.require_auth,
    );
    let routes_all = create_router(state);

    // 리스너 생성
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("{:<12} --> Server error: {}", "Main", err);
    }

    if let Some(db_manager) = db_manager {
        db_manager.close().await;
    }
    info!("{:<12} --> 서버 종료", "Main");
    Ok(())
}

/// Ctrl-C 또는 SIGTERM 대기
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("{:<12} --> Ctrl-C 핸들러 설치 실패: {}", "Main", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("{:<12} --> SIGTERM 핸들러 설치 실패: {}", "Main", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("{:<12} --> 종료 신호 수신", "Main");
}
// endregion: --- Main
