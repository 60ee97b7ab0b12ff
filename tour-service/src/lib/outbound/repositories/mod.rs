pub mod review;
pub mod tour;
pub mod user;

pub use review::PostgresReviewRepository;
pub use tour::PostgresTourRepository;
pub use user::PostgresUserRepository;
