use crate::{
    api::{calendar, leave_request, vacation},
    auth::middleware::auth_middleware,
    config::Config,
    store::{Store, mysql::MySqlStore},
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{Scope, middleware::from_fn, web};

/// Per-IP limiter allowing `requests_per_min` with a burst of the same size.
fn build_limiter(requests_per_min: u32) -> Option<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    let requests_per_min = requests_per_min.max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond((60_000 / requests_per_min as u64).max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()?;
    Some(Governor::new(&cfg))
}

/// The API routing table over any store. Auth and rate limiting are added
/// by [`configure`].
pub fn api_scope<S: Store>(prefix: &str) -> Scope {
    web::scope(prefix)
        .service(
            web::scope("/leave")
                // /leave
                .service(
                    web::resource("")
                        .route(web::get().to(leave_request::my_leaves::<S>))
                        .route(web::post().to(leave_request::create_leave::<S>)),
                )
                // /leave/administration, before /{id}
                .service(
                    web::resource("/administration")
                        .route(web::get().to(leave_request::administration::<S>)),
                )
                // /leave/{id}
                .service(
                    web::resource("/{id}").route(web::get().to(leave_request::get_leave::<S>)),
                )
                .service(
                    web::resource("/{id}/withdraw")
                        .route(web::post().to(leave_request::withdraw_leave::<S>)),
                )
                .service(
                    web::resource("/{id}/decline")
                        .route(web::post().to(leave_request::decline_leave::<S>)),
                )
                .service(
                    web::resource("/{id}/approve")
                        .route(web::post().to(leave_request::approve_leave::<S>)),
                ),
        )
        .service(
            web::scope("/vacation")
                .service(web::resource("").route(web::get().to(vacation::my_vacation::<S>)))
                .service(
                    web::resource("/{employee_id}")
                        .route(web::get().to(vacation::employee_vacation::<S>)),
                ),
        )
        .service(web::resource("/calendar").route(web::get().to(calendar::year_calendar::<S>)))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let scope = api_scope::<MySqlStore>(&config.api_prefix);

    // Protected routes: rate limiting runs before authentication
    match build_limiter(config.rate_protected_per_min) {
        Some(limiter) => {
            cfg.service(scope.wrap(from_fn(auth_middleware)).wrap(limiter));
        }
        None => {
            tracing::warn!(
                rate = config.rate_protected_per_min,
                "Invalid rate limit, serving without limiter"
            );
            cfg.service(scope.wrap(from_fn(auth_middleware)));
        }
    }
}
