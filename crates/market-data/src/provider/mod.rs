//! Provider client abstraction and the Alpha Vantage implementation.
//!
//! This module contains:
//! - The `ProviderClient` trait the service fetches through
//! - `RawResponse`, the unparsed provider answer
//! - The Alpha Vantage client and its response parser
//!
//! Fetching and parsing are separate steps. A client only moves bytes and
//! classifies transport failures; turning a body into a record is the job of
//! [`alpha_vantage::ResponseParser`].

mod traits;

pub mod alpha_vantage;

pub use traits::{ProviderClient, RawResponse};
