//! Locale redirect middleware
//!
//! Runs before every route. Requests whose path neither matches an excluded
//! prefix nor carries a supported locale are answered with a 307 redirect to
//! the locale-prefixed path; the query string is carried over.

use axum::{
    extract::{Request, State},
    http::header::ACCEPT_LANGUAGE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::routing::RouteDecision;
use crate::server::AppState;
use crate::utils::logging::log_redirect;

pub async fn locale_redirect(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    let decision = if state.negotiate_locale {
        let accept_language = request
            .headers()
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        let target = state.router.locales().negotiate(accept_language);
        state.router.route_with(path, target)
    } else {
        state.router.route(path)
    };

    match decision {
        RouteDecision::PassThrough(_) => next.run(request).await,
        RouteDecision::Redirect(target) => {
            let location = match request.uri().query() {
                Some(query) => format!("{}?{}", target, query),
                None => target,
            };
            log_redirect(path, &location);
            Redirect::temporary(&location).into_response()
        }
    }
}
