use actix_web::body::{EitherBody, MessageBody};
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use common::auth_token;
use common::server_config::AuthConfig;

use crate::auth_information::AuthInformation;

/// Bearer-token middleware: decodes the access token once and stores the
/// resolved identity in request extensions for the handlers.
#[derive(Debug)]
pub struct AuthMiddleware {
    pub auth: AuthConfig,
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            auth: self.auth.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    auth: AuthConfig,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth = self.auth.clone();
        let service = self.service.clone();

        Box::pin(async move {
            if let Some(auth_header) = req.headers().get("Authorization") {
                if let Ok(auth_str) = auth_header.to_str() {
                    if let Some(token) = auth_str.strip_prefix("Bearer ") {
                        return match auth_token::decode_access(&auth, token) {
                            Ok(claims) => match AuthInformation::from_claims(&claims) {
                                Some(info) => {
                                    req.extensions_mut().insert(info);
                                    let res = service.call(req).await?;
                                    Ok(res.map_into_left_body())
                                }
                                None => Ok(unauthorized(req, "Invalid token claims")),
                            },
                            Err(_) => Ok(unauthorized(req, "Invalid token")),
                        };
                    }
                }
            }

            Ok(unauthorized(
                req,
                "Missing or invalid Authorization header",
            ))
        })
    }
}

fn unauthorized<B>(req: ServiceRequest, message: &str) -> ServiceResponse<EitherBody<B>>
where
    B: MessageBody + 'static,
{
    let response = HttpResponse::Unauthorized().body(message.to_string());
    req.into_response(response.map_into_boxed_body().map_into_right_body())
}
