//! Request tracing middleware.
//!
//! Every request runs inside a [`TraceId`] scope and a `request` span. The id
//! is echoed in the `trace-id` response header and copied into any
//! [`crate::domain::Error`] built while handling the request. A well-formed
//! `trace-id` request header is reused so callers can correlate retries.
//!
//! Task-locals do not follow spawned tasks; wrap such work in
//! [`TraceId::scope`].

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, debug, error, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory; wrap the whole app with it.
///
/// ```
/// use actix_web::App;
/// use contacts_backend::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

fn inbound_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    req.headers()
        .get(TRACE_ID_HEADER)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
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
        let trace_id = inbound_trace_id(&req).unwrap_or_else(TraceId::generate);
        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path()
        );
        let fut = span.in_scope(|| self.service.call(req));

        Box::pin(
            TraceId::scope(trace_id, async move {
                let mut res = fut.await?;
                debug!(status = res.status().as_u16(), "request completed");
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => {
                        error!(%error, "failed to encode trace identifier header");
                    }
                }
                Ok(res)
            })
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixtureLoginService;
    use crate::domain::{Error as DomainError, LoginCredentials};
    use crate::domain::ports::LoginService;
    use actix_web::{App, HttpResponse, test, web};

    async fn call(request: test::TestRequest) -> (ServiceResponse, String) {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route(
                    "/echo",
                    web::get().to(|| async {
                        let id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
                        HttpResponse::Ok().body(id)
                    }),
                )
                .route(
                    "/fail",
                    web::get().to(|| async {
                        let creds = LoginCredentials::try_from_parts("admin", "nope")
                            .map_err(|err| DomainError::invalid_request(err.to_string()))?;
                        FixtureLoginService.authenticate(&creds).await?;
                        Ok::<_, DomainError>(HttpResponse::Ok().finish())
                    }),
                ),
        )
        .await;
        let res = test::call_service(&app, request.to_request()).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        (res, header)
    }

    #[actix_web::test]
    async fn handler_sees_the_header_trace_id() {
        let (res, header) = call(test::TestRequest::get().uri("/echo")).await;
        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8"), header);
        assert!(header.parse::<TraceId>().is_ok());
    }

    #[actix_web::test]
    async fn inbound_trace_id_is_reused() {
        let inbound = "00000000-0000-0000-0000-00000000abcd";
        let (_, header) = call(
            test::TestRequest::get()
                .uri("/echo")
                .insert_header((TRACE_ID_HEADER, inbound)),
        )
        .await;
        assert_eq!(header, inbound);
    }

    #[actix_web::test]
    async fn malformed_inbound_trace_id_is_replaced() {
        let (_, header) = call(
            test::TestRequest::get()
                .uri("/echo")
                .insert_header((TRACE_ID_HEADER, "not-a-uuid")),
        )
        .await;
        assert_ne!(header, "not-a-uuid");
        assert!(header.parse::<TraceId>().is_ok());
    }

    #[actix_web::test]
    async fn error_payload_carries_the_trace_id() {
        let (res, header) = call(test::TestRequest::get().uri("/fail")).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::UNAUTHORIZED);
        let body: DomainError = test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(header.as_str()));
    }
}
