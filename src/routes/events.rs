use actix_web::{http::header, web, HttpResponse};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::{carousel::SlideChange, state::AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/events/slides").route(web::get().to(stream_slides)))
        .service(web::resource("/carousel/next").route(web::post().to(next_slide)))
        .service(web::resource("/carousel/previous").route(web::post().to(previous_slide)))
        .service(web::resource("/carousel/{index}").route(web::post().to(go_to_slide)));
}

/// Pushes every carousel position change to connected hero sections.
async fn stream_slides(state: web::Data<AppState>) -> HttpResponse {
    let rx = state.carousel.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(change) => Some(Ok::<web::Bytes, actix_web::Error>(change_to_bytes(&change))),
        Err(_) => None,
    });

    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/event-stream"))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(stream)
}

fn change_to_bytes(change: &SlideChange) -> web::Bytes {
    let payload = serde_json::to_string(change).unwrap_or_else(|_| "{}".to_string());
    web::Bytes::from(format!("event: slide\ndata: {}\n\n", payload))
}

async fn next_slide(state: web::Data<AppState>) -> HttpResponse {
    let change = state.carousel.next().await;
    HttpResponse::Ok().json(change)
}

async fn previous_slide(state: web::Data<AppState>) -> HttpResponse {
    let change = state.carousel.previous().await;
    HttpResponse::Ok().json(change)
}

async fn go_to_slide(state: web::Data<AppState>, path: web::Path<usize>) -> HttpResponse {
    let change = state.carousel.go_to(path.into_inner()).await;
    HttpResponse::Ok().json(change)
}
