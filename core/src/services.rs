//! Per-endpoint calls for user data.

use crate::client::RequestClient;
use crate::error::RequestError;
use crate::types::{Envelope, RequestOptions};

pub const USERS_PATH: &str = "/api/users";
pub const CURRENT_USER_URL: &str = "http://localhost:8887/question/41";
pub const NOTICES_PATH: &str = "/api/notices";

/// Fixed-path GETs over a borrowed `RequestClient`. Results are passed
/// through unchanged.
#[derive(Clone, Copy)]
pub struct UserService<'a> {
    client: &'a RequestClient,
}

impl<'a> UserService<'a> {
    pub fn new(client: &'a RequestClient) -> Self {
        Self { client }
    }

    pub fn query(&self) -> Result<Envelope, RequestError> {
        self.fetch(USERS_PATH)
    }

    pub fn query_current(&self) -> Result<Envelope, RequestError> {
        self.fetch(CURRENT_USER_URL)
    }

    pub fn query_notices(&self) -> Result<Envelope, RequestError> {
        self.fetch(NOTICES_PATH)
    }

    fn fetch(&self, path: &str) -> Result<Envelope, RequestError> {
        self.client.get(path, &(), &RequestOptions::default())
    }
}
