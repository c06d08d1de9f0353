//! Controls how much internal detail error responses may reveal.
//!
//! The active [`ErrorDisclosure`] is held in task-local storage for the
//! duration of a request, mirroring the trace identifier. Code running
//! outside a request sees [`ErrorDisclosure::Redacted`].

use std::future::Future;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;

task_local! {
    static DISCLOSURE: ErrorDisclosure;
}

/// Whether server errors expose diagnostic detail to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorDisclosure {
    /// Production behaviour: 5xx bodies carry a generic message only.
    #[default]
    Redacted,
    /// Development behaviour: 5xx bodies include the internal message and a
    /// `stack` field.
    Verbose,
}

impl ErrorDisclosure {
    /// Pick the mode for a deployment environment name.
    ///
    /// Only `production` (case-insensitive) redacts.
    ///
    /// # Examples
    /// ```
    /// use contacts_backend::middleware::ErrorDisclosure;
    ///
    /// assert_eq!(ErrorDisclosure::for_environment("Production"), ErrorDisclosure::Redacted);
    /// assert_eq!(ErrorDisclosure::for_environment("development"), ErrorDisclosure::Verbose);
    /// ```
    #[must_use]
    pub fn for_environment(environment: &str) -> Self {
        if environment.trim().eq_ignore_ascii_case("production") {
            Self::Redacted
        } else {
            Self::Verbose
        }
    }

    /// Mode in scope for the current task, defaulting to redacted.
    #[must_use]
    pub fn current() -> Self {
        DISCLOSURE.try_with(|mode| *mode).unwrap_or_default()
    }

    /// Run `fut` with `self` in scope.
    pub async fn scope<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        DISCLOSURE.scope(self, fut).await
    }
}

/// Middleware installing an [`ErrorDisclosure`] for each request.
#[derive(Debug, Clone, Copy)]
pub struct Disclosure(pub ErrorDisclosure);

impl<S, B> Transform<S, ServiceRequest> for Disclosure
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = DisclosureMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DisclosureMiddleware {
            service,
            mode: self.0,
        }))
    }
}

/// Service produced by [`Disclosure`].
pub struct DisclosureMiddleware<S> {
    service: S,
    mode: ErrorDisclosure,
}

impl<S, B> Service<ServiceRequest> for DisclosureMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        Box::pin(self.mode.scope(fut))
    }
}
