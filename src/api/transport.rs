use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::prelude::*;

/// Sends a JSON body to the service on behalf of an already authenticated session.
pub trait Transport {
    /// Post the body and return the response, whatever its status.
    ///
    /// Only connection-level failures are errors here: HTTP error statuses are
    /// returned as a normal [`Response`].
    fn post(&self, url: &str, body: &Value) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, url: &str, body: &Value) -> Result<Response> {
        (**self).post(url, body)
    }
}

/// Raw service response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.status >= 400
    }

    pub fn json<R: DeserializeOwned>(&self) -> Result<R> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[cfg(test)]
pub mod mock {
    use std::{cell::RefCell, collections::VecDeque};

    use super::*;

    /// Records outgoing requests and replays canned responses in order.
    #[derive(Default)]
    pub struct MockTransport {
        pub requests: RefCell<Vec<(String, Value)>>,
        responses: RefCell<VecDeque<Response>>,
    }

    impl MockTransport {
        pub fn with_responses(responses: impl IntoIterator<Item = Response>) -> Self {
            Self { requests: RefCell::default(), responses: RefCell::new(responses.into_iter().collect()) }
        }

        pub fn replying(status: u16, body: &Value) -> Self {
            Self::with_responses([Response::new(status, body.to_string())])
        }

        pub fn n_requests(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn last_request(&self) -> (String, Value) {
            self.requests.borrow().last().cloned().expect("no requests were sent")
        }
    }

    impl Transport for MockTransport {
        fn post(&self, url: &str, body: &Value) -> Result<Response> {
            self.requests.borrow_mut().push((url.to_owned(), body.clone()));
            Ok(self.responses.borrow_mut().pop_front().expect("no more canned responses"))
        }
    }
}
