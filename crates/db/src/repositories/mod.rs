//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement operations
//! (registration, top-up, call settlement, rating) run in transactions.

pub mod advocate_repo;
pub mod analytics_repo;
pub mod call_repo;
pub mod otp_repo;
pub mod session_repo;
pub mod user_repo;
pub mod wallet_repo;

pub use advocate_repo::AdvocateRepo;
pub use analytics_repo::AnalyticsRepo;
pub use call_repo::CallRepo;
pub use otp_repo::OtpRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use wallet_repo::WalletRepo;
