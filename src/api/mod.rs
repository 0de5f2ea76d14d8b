//! Remote API access
//!
//! This module provides:
//! - Wire models for users, books and the `{ data, meta? }` envelope
//! - The HTTP gateway trait and its reqwest implementation
//! - The 401 interceptor

pub mod gateway;
pub mod interceptor;
pub mod models;

pub use gateway::{ApiRequest, GatewayExt, HttpGateway, ReqwestGateway};
pub use interceptor::ErrorInterceptor;
