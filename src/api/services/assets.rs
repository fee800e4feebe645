//! Embedded static assets
//!
//! The stylesheet and any page assets are embedded into the binary with
//! rust-embed and served under /assets.

use actix_web::{HttpRequest, HttpResponse, Result};
use rust_embed::Embed;
use tracing::debug;

#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

pub async fn handle_asset(req: HttpRequest) -> Result<HttpResponse> {
    let path = req.match_info().query("path");

    match StaticAssets::get(path) {
        Some(content) => Ok(HttpResponse::Ok()
            .content_type(get_content_type(path))
            .body(content.data.into_owned())),
        None => {
            debug!("static asset not found: {}", path);
            Ok(HttpResponse::NotFound().body("File not found"))
        }
    }
}

fn get_content_type(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_match_extension() {
        assert_eq!(get_content_type("board.css"), "text/css; charset=utf-8");
        assert_eq!(get_content_type("logo.svg"), "image/svg+xml");
        assert_eq!(get_content_type("unknown.bin"), "application/octet-stream");
    }

    #[test]
    fn stylesheet_is_embedded() {
        assert!(StaticAssets::get("achievements.css").is_some());
    }
}
