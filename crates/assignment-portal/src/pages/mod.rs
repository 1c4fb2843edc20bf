//! Server-rendered HTML views for the portal routes.

pub mod error;
pub mod form;
pub mod layout;
pub mod thank_you;

pub const FORM_ROUTE: &str = "/";
pub const THANK_YOU_ROUTE: &str = "/thank-you";

pub use error::ErrorBoundary;
