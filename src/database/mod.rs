use sqlx::postgres::{PgPool, PgPoolOptions};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{error, info};

pub struct DatabaseManager {
    pub pool: Arc<PgPool>,
}

impl DatabaseManager {
    /// 데이터베이스 연결 및 매니저 생성
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| {
                error!("{:<12} --> 데이터베이스 연결 실패: {}", "Database", e);
                e
            })?;
        info!("{:<12} --> 데이터베이스 연결 성공", "Database");
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// 트랜잭션 실행
    pub async fn transaction<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: for<'c> FnOnce(
            &'c mut sqlx::Transaction<'_, sqlx::Postgres>,
        ) -> Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'c>>,
        E: From<sqlx::Error>,
    {
        let mut tx = self.pool.begin().await?;
        let result = f(&mut tx).await;
        match result {
            Ok(r) => {
                tx.commit().await?;
                Ok(r)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e)
            }
        }
    }

    /// 스키마 초기화 (이미 존재하는 테이블은 유지)
    pub async fn initialize_database(&self) -> Result<(), sqlx::Error> {
        let create_schema_sql = include_str!("../../sql/01-create-schema.sql");
        self.execute_multi_query(create_schema_sql).await?;
        Ok(())
    }

    /// 여러 쿼리 실행
    async fn execute_multi_query(&self, sql: &str) -> Result<(), sqlx::Error> {
        for query in sql.split(';') {
            let query = query.trim();
            if !query.is_empty() {
                sqlx::query(query).execute(&*self.pool).await?;
            }
        }
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 연결 풀 종료
    pub async fn close(&self) {
        self.pool.close().await;
        info!("{:<12} --> 데이터베이스 연결 종료", "Database");
    }
}
