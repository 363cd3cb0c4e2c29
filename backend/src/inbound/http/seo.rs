//! Search-engine documents served from the site root.

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};

use crate::domain::sitemap::{render_robots, render_sitemap};
use crate::inbound::http::state::HttpState;

/// XML sitemap of static pages and attraction detail pages.
#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses((status = 200, description = "Sitemap document", content_type = "application/xml", body = String)),
    tags = ["seo"],
    operation_id = "sitemap",
    security([])
)]
#[get("/sitemap.xml")]
pub async fn sitemap(state: web::Data<HttpState>) -> HttpResponse {
    let entries = state.sitemap.sitemap_entries().await;
    HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
        .body(render_sitemap(&entries))
}

/// Crawler rules pointing at the sitemap.
#[utoipa::path(
    get,
    path = "/robots.txt",
    responses((status = 200, description = "Robots rules", content_type = "text/plain", body = String)),
    tags = ["seo"],
    operation_id = "robots",
    security([])
)]
#[get("/robots.txt")]
pub async fn robots(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(render_robots(&state.site_url))
}
