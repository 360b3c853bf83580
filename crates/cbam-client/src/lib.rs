#![forbid(unsafe_code)]

//! CBAM backend client.
//!
//! Blocking HTTP client for the compliance backend's reference endpoints
//! and form-submission endpoints. Reference fetches come in two flavors:
//! strict (`try_fetch_*`, returning [`ClientError`]) and recovering
//! (`fetch_*`), which log the failure and substitute an empty list so the
//! wizard renders empty option lists instead of crashing.
//!
//! Submission (`submit`/`update`) is strict and carries no retry: the
//! host surfaces the error and the operator resubmits.

pub mod client;
pub mod error;

pub use client::{COUNTRIES_PATH, CbamClient, ClientConfig, ELECTRICITY_PATH, GOODS_PATH};
pub use error::{ClientError, Result};
