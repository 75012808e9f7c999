//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod library_repo;
pub mod referral_repo;
pub mod training_progress_repo;
pub mod training_question_repo;
pub mod training_video_repo;
pub mod user_repo;

pub use library_repo::LibraryRepo;
pub use referral_repo::ReferralRepo;
pub use training_progress_repo::TrainingProgressRepo;
pub use training_question_repo::TrainingQuestionRepo;
pub use training_video_repo::TrainingVideoRepo;
pub use user_repo::UserRepo;
