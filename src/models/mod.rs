//! Data models for the library server

pub mod book;
pub mod checkout;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookSummary};
pub use checkout::{Checkout, CheckoutDetails, UserCheckout};
pub use user::{User, UserDetail, UserSummary};
