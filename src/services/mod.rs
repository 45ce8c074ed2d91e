// Service exports
pub mod auth;
pub mod cache;
pub mod postgres;
pub mod repository;

pub use auth::{AuthError, AuthenticatedUser, Claims, JwtVerifier};
pub use cache::{CacheError, CacheKey, CacheManager};
pub use postgres::PostgresClient;
pub use repository::{CandidateRepository, JobRepository, RepositoryError};
