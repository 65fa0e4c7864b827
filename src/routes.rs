use crate::{
    api::{self, attendance},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = 60_000 / requests_per_min as u64;
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms.max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("period and burst size are non-zero");
        Governor::new(&cfg)
    }

    let scan_limiter = build_limiter(config.rate_scan_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .app_data(api::json_config())
            .app_data(api::query_config())
            .service(
                web::scope("/attendance")
                    .wrap(scan_limiter) // scanner stations share one budget per IP
                    .configure(attendance_routes),
            ),
    );
}

pub fn attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // /attendance
        .service(
            web::resource("")
                .route(web::post().to(attendance::mark_attendance))
                .route(web::get().to(attendance::list_attendance)),
        )
        // /attendance/scan
        .service(web::resource("/scan").route(web::post().to(attendance::scan_document)));
}
