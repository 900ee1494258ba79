//! # Application Services Container
//!
//! 저장소 구현과 설정을 받아 서비스 그래프를 한 번에 조립하고, 각 서비스를
//! `web::Data`로 `App`에 등록합니다.
//!
//! 전역 레지스트리 없이 생성자 주입만 사용합니다. 서비스가 필요로 하는 저장소와
//! 설정은 모두 생성 시점에 전달되며, 실행 중에 다시 읽지 않습니다.
//!
//! ```text
//! UserStore ──────┬─▶ UserService ──┬─▶ AuthService
//!                 │                 └─▶ FederatedAuthService
//! ProductStore ───┼─▶ ProductService
//! OrderStore ─────┴─▶ OrderService
//! JwtConfig ──────────▶ TokenService ──▶ (AuthMiddleware, AuthService, FederatedAuthService)
//! ```
//!
//! # 예제
//!
//! ```rust,ignore
//! let services = AppServices::in_memory(AuthSettings::new(JwtConfig::new("secret"), None))?;
//!
//! let app = App::new()
//!     .configure(|cfg| services.register(cfg))
//!     .configure(configure_all_routes);
//! ```

use std::sync::Arc;

use actix_web::web;

use crate::config::{AdminConfig, Environment, JwtConfig, OAuthConfig, PasswordConfig};
use crate::errors::AppResult;
use crate::repositories::orders::{InMemoryOrderRepository, OrderStore};
use crate::repositories::products::{InMemoryProductRepository, ProductStore};
use crate::repositories::users::{InMemoryUserRepository, UserStore};
use crate::services::auth::{AuthService, FederatedAuthService, PasswordHasher, TokenService};
use crate::services::orders::OrderService;
use crate::services::products::ProductService;
use crate::services::users::UserService;

/// 인증 관련 설정 묶음
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt: JwtConfig,
    pub admin: Option<AdminConfig>,
    pub oauth: OAuthConfig,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    /// 소셜 로그인 비활성, 최소 해싱 비용
    pub fn new(jwt: JwtConfig, admin: Option<AdminConfig>) -> Self {
        Self {
            jwt,
            admin,
            oauth: OAuthConfig::default(),
            bcrypt_cost: PasswordConfig::bcrypt_cost_for_env(&Environment::Test),
        }
    }

    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            admin: AdminConfig::from_env(),
            oauth: OAuthConfig::from_env(),
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
        })
    }
}

/// `App`에 등록되는 서비스 핸들 모음
#[derive(Clone)]
pub struct AppServices {
    pub tokens: web::Data<TokenService>,
    pub users: web::Data<UserService>,
    pub auth: web::Data<AuthService>,
    pub federated: web::Data<FederatedAuthService>,
    pub products: web::Data<ProductService>,
    pub orders: web::Data<OrderService>,
}

impl AppServices {
    pub fn build(
        user_store: Arc<dyn UserStore>,
        product_store: Arc<dyn ProductStore>,
        order_store: Arc<dyn OrderStore>,
        settings: AuthSettings,
    ) -> AppResult<Self> {
        let hasher = PasswordHasher::new(settings.bcrypt_cost)?;
        let tokens = Arc::new(TokenService::new(&settings.jwt));
        let users = Arc::new(UserService::new(user_store.clone(), hasher));

        let auth = AuthService::new(users.clone(), tokens.clone(), settings.admin);
        let federated = FederatedAuthService::new(settings.oauth, tokens.clone(), users.clone())?;
        let products = ProductService::new(product_store.clone());
        let orders = OrderService::new(order_store, product_store, user_store);

        Ok(Self {
            tokens: web::Data::from(tokens),
            users: web::Data::from(users),
            auth: web::Data::new(auth),
            federated: web::Data::new(federated),
            products: web::Data::new(products),
            orders: web::Data::new(orders),
        })
    }

    /// 메모리 저장소 기반 서비스 그래프
    pub fn in_memory(settings: AuthSettings) -> AppResult<Self> {
        Self::build(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemoryOrderRepository::new()),
            settings,
        )
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.tokens.clone())
            .app_data(self.users.clone())
            .app_data(self.auth.clone())
            .app_data(self.federated.clone())
            .app_data(self.products.clone())
            .app_data(self.orders.clone());
    }
}
