use crate::{api::dashboard, auth::middleware::auth_middleware, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .configure(dashboard_routes),
    );
}

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_default();
    Governor::new(&cfg)
}

pub fn dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            // /dashboard/locations
            .service(web::resource("/locations").route(web::get().to(dashboard::list_locations)))
            // /dashboard/attendance/summary
            .service(
                web::resource("/attendance/summary")
                    .route(web::post().to(dashboard::attendance_summary)),
            )
            // /dashboard/attendance/drill-down
            .service(
                web::resource("/attendance/drill-down")
                    .route(web::post().to(dashboard::attendance_drill_down)),
            )
            // /dashboard/attendance/{predicate}/chart
            .service(
                web::resource("/attendance/{predicate}/chart")
                    .route(web::post().to(dashboard::attendance_chart)),
            )
            // /dashboard/attendance/{predicate}/employees
            .service(
                web::resource("/attendance/{predicate}/employees")
                    .route(web::post().to(dashboard::attendance_employees)),
            ),
    );
}
