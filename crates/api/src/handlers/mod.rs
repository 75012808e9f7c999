pub mod library;
pub mod referral;
pub mod training;
