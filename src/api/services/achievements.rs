//! Achievements page endpoint
//!
//! One GET endpoint that renders the achievement board, or the frozen
//! page while scoring is frozen. Rendered HTML is memoized for a short
//! TTL so a burst of callers shares one computation.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use askama::Template;
use chrono::Utc;
use tracing::error;

use crate::cache::{ACHIEVEMENTS_PAGE_KEY, PageCache};
use crate::config::get_config;
use crate::errors::Result;
use crate::services::{AchievementBoard, AchievementSlot, AchievementsService};

#[derive(Template)]
#[template(path = "achievements.html")]
struct AchievementsPage<'a> {
    slots: &'a [AchievementSlot],
    dominator: Option<&'a str>,
    generated_at: String,
}

#[derive(Template)]
#[template(path = "scoreboard_frozen.html")]
struct FrozenPage;

/// Render the board view model to HTML.
pub fn render_board(board: &AchievementBoard) -> Result<String> {
    let page = AchievementsPage {
        slots: &board.slots,
        dominator: board.dominator.as_deref(),
        generated_at: board.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    };
    Ok(page.render()?)
}

/// Render the "scoreboard frozen" page.
pub fn render_frozen() -> Result<String> {
    Ok(FrozenPage.render()?)
}

fn html_response(html: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// GET /achievements - the achievement board
pub async fn achievements_page(
    service: web::Data<Arc<AchievementsService>>,
    cache: web::Data<PageCache>,
) -> actix_web::Result<HttpResponse> {
    if let Some(cached) = cache.get(ACHIEVEMENTS_PAGE_KEY).await {
        return Ok(html_response((*cached).clone()));
    }

    let config = get_config();
    let rendered = if config.scoreboard.is_frozen(Utc::now()) {
        render_frozen()
    } else {
        match service.compute_board().await {
            Ok(board) => render_board(&board),
            Err(e) => {
                error!("failed to compute achievement board: {}", e);
                return Ok(HttpResponse::InternalServerError()
                    .content_type("text/html; charset=utf-8")
                    .body("<h1>500 Internal Server Error</h1>"));
            }
        }
    };

    match rendered {
        Ok(html) => {
            let cached = cache.insert(ACHIEVEMENTS_PAGE_KEY, html).await;
            Ok(html_response((*cached).clone()))
        }
        Err(e) => {
            error!("failed to render achievements page: {}", e);
            Ok(HttpResponse::InternalServerError()
                .content_type("text/html; charset=utf-8")
                .body("<h1>500 Internal Server Error</h1>"))
        }
    }
}
