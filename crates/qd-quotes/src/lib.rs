//! Market quotes for the quantdesk pricing library.
//!
//! A [`Quote`] is a single observable market value, such as an equity spot
//! price, a deposit rate or a z-spread. Quotes are handed to term structures
//! and pricing engines behind `Arc<dyn Quote>`, so a single market value can
//! feed several consumers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod quote;

pub use quote::{Quote, SimpleQuote};
