//! HTTP adapter for the testimonial service.
//!
//! One client, one base URL, JSON everywhere except testimonial creation,
//! which is multipart so a video file can ride along. The bearer token is
//! attached inside [`ApiClient::request`] and nowhere else — a caller
//! cannot build a request that forgets it. The token is re-read from the
//! store per request, so login/logout in the same process (or an external
//! edit of the auth file) is picked up immediately.
//!
//! No retry or backoff: a failed request surfaces as a single error.

use crate::token_store::TokenStore;
use crate::types::{
    AuthResponse, NewAccount, NewTestimonial, TestimonialPatch, Testimonial, User,
};
use anyhow::{anyhow, Result};
use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use reqwest::Method;

/// Trait over the service operations so the store can be tested against
/// a fake (same seam as mocking an upstream client).
pub trait TestimonialApi {
    fn login(&self, email: &str, password: &str) -> Result<AuthResponse>;
    fn register(&self, account: &NewAccount) -> Result<AuthResponse>;
    fn me(&self) -> Result<User>;
    fn list(&self) -> Result<Vec<Testimonial>>;
    fn create(&self, new: &NewTestimonial) -> Result<Testimonial>;
    fn update(&self, id: &str, patch: &TestimonialPatch) -> Result<Testimonial>;
    fn delete(&self, id: &str) -> Result<()>;
    fn approve(&self, id: &str) -> Result<()>;
    fn reject(&self, id: &str) -> Result<()>;
}

pub struct ApiClient {
    base_url: String,
    http: HttpClient,
    tokens: TokenStore,
}

impl ApiClient {
    /// Create a client for a base URL ending in `/api` (trailing slashes
    /// are trimmed).
    pub fn new(base_url: &str, tokens: TokenStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: HttpClient::new(),
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request for `path`, attaching `Authorization: Bearer` when
    /// a token is stored. Attached uniformly — login and register carry
    /// it too, which the service ignores.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.http.request(method, self.url(path));
        if let Some(token) = self.tokens.load() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send and map non-2xx statuses to errors carrying status and body.
    fn send(req: RequestBuilder) -> Result<Response> {
        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(anyhow!("API error {}: {}", status.as_u16(), body));
        }
        Ok(resp)
    }
}

impl TestimonialApi for ApiClient {
    fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = serde_json::json!({ "email": email, "password": password });
        let resp = Self::send(self.request(Method::POST, "/auth/login").json(&body))?;
        Ok(resp.json()?)
    }

    fn register(&self, account: &NewAccount) -> Result<AuthResponse> {
        let resp = Self::send(self.request(Method::POST, "/auth/register").json(account))?;
        Ok(resp.json()?)
    }

    fn me(&self) -> Result<User> {
        let resp = Self::send(self.request(Method::GET, "/auth/me"))?;
        Ok(resp.json()?)
    }

    fn list(&self) -> Result<Vec<Testimonial>> {
        // The full collection; the service offers no filter, sort, or
        // pagination parameters on this endpoint.
        let resp = Self::send(self.request(Method::GET, "/testimonials"))?;
        Ok(resp.json()?)
    }

    fn create(&self, new: &NewTestimonial) -> Result<Testimonial> {
        let mut form = Form::new()
            .text("content", new.content.clone())
            .text("rating", new.rating.to_string())
            .text("type", new.kind.as_str());
        if let Some(path) = &new.video {
            // Optional even for kind=video; the service accepts a video
            // testimonial with no attachment.
            form = form.file("video", path)?;
        }
        let resp = Self::send(self.request(Method::POST, "/testimonials").multipart(form))?;
        Ok(resp.json()?)
    }

    fn update(&self, id: &str, patch: &TestimonialPatch) -> Result<Testimonial> {
        let path = format!("/testimonials/{}", id);
        let resp = Self::send(self.request(Method::PATCH, &path).json(patch))?;
        Ok(resp.json()?)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = format!("/testimonials/{}", id);
        Self::send(self.request(Method::DELETE, &path))?;
        Ok(())
    }

    fn approve(&self, id: &str) -> Result<()> {
        let path = format!("/testimonials/{}/approve", id);
        Self::send(self.request(Method::POST, &path))?;
        Ok(())
    }

    fn reject(&self, id: &str) -> Result<()> {
        let path = format!("/testimonials/{}/reject", id);
        Self::send(self.request(Method::POST, &path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, TokenStore::new())
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let c = client("http://localhost:4000/api/");
        assert_eq!(
            c.url("/testimonials"),
            "http://localhost:4000/api/testimonials"
        );
    }

    #[test]
    fn test_url_join() {
        let c = client("https://stories.example/api");
        assert_eq!(c.url("/auth/me"), "https://stories.example/api/auth/me");
        assert_eq!(
            c.url("/testimonials/t-9/approve"),
            "https://stories.example/api/testimonials/t-9/approve"
        );
    }
}
