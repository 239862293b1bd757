use std::future::{ready, Ready};
use std::panic::{self, AssertUnwindSafe};

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::utils::html;

pub const PANIC_PAGE: &str = "<h2>Error occurred while processing the request</h2>";

/// Turns a panicking handler into the generic failure page so the worker
/// keeps serving. The panic itself is logged by the process-wide hook.
pub struct CatchPanic;

impl<S, B> Transform<S, ServiceRequest> for CatchPanic
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CatchPanicMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CatchPanicMiddleware { service }))
    }
}

pub struct CatchPanicMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CatchPanicMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let http_req = req.request().clone();
        let path = req.path().to_string();

        let fut = match panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(_) => {
                log::error!("❌ Request to {} panicked", path);
                let res = ServiceResponse::new(http_req, html::page(PANIC_PAGE));
                return Box::pin(async move { Ok(res.map_into_right_body()) });
            }
        };

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(res) => res.map(ServiceResponse::map_into_left_body),
                Err(_) => {
                    log::error!("❌ Request to {} panicked", path);
                    Ok(ServiceResponse::new(http_req, html::page(PANIC_PAGE)).map_into_right_body())
                }
            }
        })
    }
}
