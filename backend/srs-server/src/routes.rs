use crate::api::{self, ApiError};
use crate::app_state::AppState;

use srs_core::{Endpoint, HttpMethod, ROUTE_TABLE};

use axum::{
    Router,
    extract::Request,
    http::header,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{MethodFilter, MethodRouter, on},
};

/// Build the application router from the static route table.
///
/// Each endpoint is mounted under its own method, and endpoints that take a
/// body only see requests declaring the content type the table lists. Unknown
/// paths fall through to a 404; a known path with the wrong method gets
/// axum's 405.
pub fn build_router(state: AppState) -> Router {
    ROUTE_TABLE
        .into_iter()
        .fold(Router::new(), |router, endpoint| {
            router.route(endpoint.path(), method_router(endpoint))
        })
        .fallback(api::not_found)
        .with_state(state)
}

fn method_router(endpoint: Endpoint) -> MethodRouter<AppState> {
    let filter = method_filter(endpoint.method());
    let router = match endpoint {
        Endpoint::Ping => on(filter, api::ping),
        Endpoint::Exec => on(filter, api::exec),
        Endpoint::Query => on(filter, api::query),
        Endpoint::Exit => on(filter, api::exit),
    };

    match endpoint.consumes() {
        // route_layer so a wrong method still answers 405, not 415
        Some(expected) => router.route_layer(middleware::from_fn(
            move |request: Request, next: Next| require_content_type(expected, request, next),
        )),
        None => router,
    }
}

fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Post => MethodFilter::POST,
    }
}

async fn require_content_type(expected: &'static str, request: Request, next: Next) -> Response {
    let declared = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    // Parameters such as `; charset=utf-8` do not change the media type
    let media_type = declared.split(';').next().unwrap_or_default().trim();
    if !media_type.eq_ignore_ascii_case(expected) {
        return ApiError::unsupported_media_type(expected, declared).into_response();
    }

    next.run(request).await
}
