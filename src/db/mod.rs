//! Database Connection Management Module
//!
//! MongoDB 연결을 생성하고 컬렉션 핸들을 제공합니다.
//!
//! # 환경 변수 설정
//!
//! ```bash
//! # MongoDB 연결 URI
//! export MONGODB_URI="mongodb://localhost:27017"
//!
//! # 사용할 데이터베이스 이름
//! export DATABASE_NAME="storefront"
//! ```
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_backend::db::Database;
//! use storefront_backend::repositories::users::MongoUserRepository;
//!
//! let database = Arc::new(Database::new().await?);
//! let user_repo = MongoUserRepository::new(database.clone());
//! user_repo.create_indexes().await?;
//! ```

use std::env;

use log::info;
use mongodb::{options::ClientOptions, Client, Collection};

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 환경 변수 기반으로 연결을 생성하고 `ping`으로 연결을 확인합니다.
    pub async fn new() -> Result<Self, mongodb::error::Error> {
        let mongodb_uri = env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let database_name = env::var("DATABASE_NAME")
            .unwrap_or_else(|_| "storefront".to_string());

        Self::connect(&mongodb_uri, database_name).await
    }

    pub async fn connect(uri: &str, database_name: String) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // 애플리케이션 이름 설정 (서버 측 모니터링에 표시)
        client_options.app_name = Some("storefront_backend".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 타입이 지정된 컬렉션 핸들
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.get_database().collection::<T>(name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
