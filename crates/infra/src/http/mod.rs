//! HTTP transport and the signed-request pipeline
//!
//! [`HttpSend`] is the single capability the typed client needs from the
//! network. [`HttpClient`] implements it over reqwest, and
//! [`SignedRequestLayer`] decorates any implementation with request
//! signing and API version injection.

pub mod client;
pub mod signing;

use std::sync::Arc;

use apim_domain::Result;
use async_trait::async_trait;
use reqwest::{Request, Response};

pub use client::{HttpClient, HttpClientBuilder};
pub use signing::SignedRequestLayer;

/// Send one HTTP request and return the response, whatever its status.
///
/// Only transport failures are errors; non-success statuses are returned
/// as responses for the caller to interpret.
#[async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<T: HttpSend + ?Sized> HttpSend for Arc<T> {
    async fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: HttpSend + ?Sized> HttpSend for Box<T> {
    async fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request).await
    }
}
