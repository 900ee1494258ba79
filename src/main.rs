//! 스토어프론트 백엔드 메인 애플리케이션
//!
//! 설정을 읽고 MongoDB 저장소와 서비스를 조립한 뒤 Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use storefront_backend::config::ServerConfig;
use storefront_backend::db::Database;
use storefront_backend::repositories::orders::{MongoOrderRepository, OrderStore};
use storefront_backend::repositories::products::{MongoProductRepository, ProductStore};
use storefront_backend::repositories::users::{MongoUserRepository, UserStore};
use storefront_backend::routes::configure_all_routes;
use storefront_backend::state::{AppServices, AuthSettings};

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 스토어프론트 백엔드 시작중...");

    let settings = AuthSettings::from_env().map_err(|e| {
        error!("설정 로드 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    if settings.admin.is_none() {
        warn!("ADMIN_USERNAME/ADMIN_PASSWORD가 설정되지 않아 관리자 로그인이 비활성화됩니다");
    }

    let services = initialize_services(settings).await?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(services).await
}

/// MongoDB 저장소를 연결하고 인덱스를 만든 뒤 서비스 그래프를 조립합니다
///
/// # Errors
///
/// * 데이터베이스 연결 실패
/// * 인덱스 생성 실패
async fn initialize_services(settings: AuthSettings) -> io::Result<AppServices> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await.map_err(|e| {
        error!("데이터베이스 연결 실패: {}", e);
        io::Error::other(e.to_string())
    })?);

    let user_store: Arc<dyn UserStore> = Arc::new(MongoUserRepository::new(database.clone()));
    let product_store: Arc<dyn ProductStore> = Arc::new(MongoProductRepository::new(database.clone()));
    let order_store: Arc<dyn OrderStore> = Arc::new(MongoOrderRepository::new(database));

    // 유니크 인덱스가 아이디/이메일 중복의 최종 판정자이므로 서버 시작 전에 반드시 생성
    let index_results = [
        user_store.init().await,
        product_store.init().await,
        order_store.init().await,
    ];
    for result in index_results {
        result.map_err(|e| {
            error!("인덱스 생성 실패: {}", e);
            io::Error::other(e.to_string())
        })?;
    }

    info!("✅ 인덱스 준비 완료");

    AppServices::build(user_store, product_store, order_store, settings)
        .map_err(|e| io::Error::other(e.to_string()))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(services: AppServices) -> io::Result<()> {
    let bind_address = (ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{}:{} 에서 실행중입니다", bind_address.0, bind_address.1);
    info!("📍 Health check: http://{}:{}/health", bind_address.0, bind_address.1);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 유효하지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let frontend_url = ServerConfig::frontend_url();

    HttpServer::new(move || {
        let cors = configure_cors(&frontend_url);
        let services = services.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 서비스 등록
            .configure(|cfg| services.register(cfg))

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// RUST_LOG=storefront_backend::middlewares=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// `FRONTEND_URL`(기본값 `http://localhost:3000`)만 허용합니다.
fn configure_cors(frontend_url: &str) -> Cors {
    Cors::default()
        .allowed_origin(frontend_url)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
