use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{info, trace};

use crate::api::constants;
use crate::api::jwt::get_jwt_service;

/// Authentication middleware for the achievements page
///
/// Accepts a JWT access token from the `Authorization: Bearer` header or
/// the platform's access cookie. Anything else gets a 401.
#[derive(Clone)]
pub struct AuthGuard;

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGuardMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("achievements page access denied - invalid or missing token");
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
                .body("<h1>401 Unauthorized</h1><p>Sign in to the platform first.</p>")
                .map_into_right_body(),
        )
    }

    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    }

    fn validate_token(token: &str) -> bool {
        match get_jwt_service().validate_access_token(token) {
            Ok(_claims) => {
                trace!("access token validation successful");
                true
            }
            Err(e) => {
                info!("access token validation failed: {}", e);
                false
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            if let Some(token) = Self::extract_bearer_token(&req)
                && Self::validate_token(&token)
            {
                trace!("authenticated via Bearer token");
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            let cookie_token = req
                .cookie(constants::ACCESS_COOKIE_NAME)
                .map(|c| c.value().to_string());
            if let Some(token) = cookie_token
                && Self::validate_token(&token)
            {
                trace!("authenticated via access cookie");
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            Ok(Self::handle_unauthorized(req))
        })
    }
}
