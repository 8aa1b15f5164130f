use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::redis::RedisClient;
use adapter::repository::{
    auth::AuthRepositoryImpl, health::HealthCheckRepositoryImpl, message::MessageRepositoryImpl,
    property::PropertyRepositoryImpl, reservation::ReservationRepositoryImpl,
    review::ReviewRepositoryImpl, transaction::TransactionRepositoryImpl,
    user::UserRepositoryImpl,
};
use kernel::repository::{
    auth::AuthRepository, health::HealthCheckRepository, message::MessageRepository,
    property::PropertyRepository, reservation::ReservationRepository, review::ReviewRepository,
    transaction::TransactionRepository, user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    property_repository: Arc<dyn PropertyRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    transaction_repository: Arc<dyn TransactionRepository>,
    message_repository: Arc<dyn MessageRepository>,
    review_repository: Arc<dyn ReviewRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let property_repository = Arc::new(PropertyRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let transaction_repository = Arc::new(TransactionRepositoryImpl::new(pool.clone()));
        let message_repository = Arc::new(MessageRepositoryImpl::new(pool.clone()));
        let review_repository = Arc::new(ReviewRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            property_repository,
            reservation_repository,
            transaction_repository,
            message_repository,
            review_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn property_repository(&self) -> Arc<dyn PropertyRepository> {
        self.property_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn transaction_repository(&self) -> Arc<dyn TransactionRepository> {
        self.transaction_repository.clone()
    }

    pub fn message_repository(&self) -> Arc<dyn MessageRepository> {
        self.message_repository.clone()
    }

    pub fn review_repository(&self) -> Arc<dyn ReviewRepository> {
        self.review_repository.clone()
    }
}
