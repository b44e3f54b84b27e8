use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ErrorUnauthorized;
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};

pub type UserId = String;

/// Header set by the upstream gateway once it has authenticated the caller.
pub const IDENTITY_HEADER: &str = "X-User-Id";

/// Middleware that lifts the gateway-supplied identity into request
/// extensions so handlers can take `web::ReqData<UserId>`. Requests without
/// the header never made it through the gateway and are rejected with 401.
pub struct HeaderIdentity;

impl<S, B> Transform<S, ServiceRequest> for HeaderIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = HeaderIdentityMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(HeaderIdentityMiddleware { service }))
    }
}

pub struct HeaderIdentityMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for HeaderIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let user_id = req
            .headers()
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());

        match user_id {
            Some(user_id) => {
                req.extensions_mut().insert::<UserId>(user_id);
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            }
            None => Box::pin(ready(Err(ErrorUnauthorized("Missing user identity")))),
        }
    }
}
