//! User Info
//!
//! The token→profile leg of the login flow.

pub mod fetcher;

pub use fetcher::{
    create_mock_user_profile_fetcher, MockUserProfileFetcher, UserProfileFetcher,
    UserProfileFetcherImpl,
};
