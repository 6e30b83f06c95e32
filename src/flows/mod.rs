//! Flows
//!
//! The code→token leg of the login flow.

pub mod authorization_code;

pub use authorization_code::{
    create_mock_authorization_code_flow, AuthorizationCodeFlow, AuthorizationCodeFlowImpl,
    MockAuthorizationCodeFlow,
};
