use crate::{api::attendance, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let attendance_limiter = Arc::new(build_limiter(config.rate_attendance_per_min));
    let evaluate_limiter = Arc::new(build_limiter(config.rate_evaluate_per_min));

    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/attendance")
                .service(
                    web::resource("/day")
                        .wrap(attendance_limiter.clone())
                        .route(web::get().to(attendance::day_view)),
                )
                .service(
                    web::resource("/month")
                        .wrap(attendance_limiter.clone())
                        .route(web::get().to(attendance::month_view)),
                )
                .service(
                    web::resource("/evaluate")
                        .wrap(evaluate_limiter.clone())
                        .route(web::post().to(attendance::evaluate_snapshot)),
                )
                .service(
                    web::resource("/day-close")
                        .wrap(evaluate_limiter.clone())
                        .route(web::post().to(attendance::day_close_preview)),
                ),
        ),
    );
}
