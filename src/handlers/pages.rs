//! Locale-aware page handlers
//!
//! Pages are only reached after the locale redirect middleware let the
//! request through, so the first path segment normally names a supported
//! locale. The handlers render the document shell the client app mounts into.

use axum::{
    extract::{Path, State},
    response::Html,
};

use crate::models::Locale;
use crate::server::{AppError, AppState};

/// `GET /`; the locale middleware redirects before this runs
pub async fn root_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_shell(state.router.locales().default_locale(), ""))
}

/// `GET /:locale`
pub async fn locale_home_handler(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Html<String>, AppError> {
    let locale = lookup(&state, &locale)?;
    Ok(Html(render_shell(locale, "")))
}

/// `GET /:locale/*rest`
pub async fn locale_page_handler(
    State(state): State<AppState>,
    Path((locale, rest)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    let locale = lookup(&state, &locale)?;
    Ok(Html(render_shell(locale, &rest)))
}

fn lookup<'s>(state: &'s AppState, tag: &str) -> Result<&'s Locale, AppError> {
    state
        .router
        .locales()
        .get(tag)
        .ok_or_else(|| AppError::NotFound(format!("Unknown locale: {}", tag)))
}

/// Page slug for a path below the locale; the locale root is `home`
pub fn page_slug(rest: &str) -> String {
    let trimmed = rest.trim_matches('/');
    if trimmed.is_empty() {
        "home".to_string()
    } else {
        trimmed.to_string()
    }
}

/// HTML document shell with the locale's language and text direction
pub fn render_shell(locale: &Locale, rest: &str) -> String {
    let slug = escape_html(&page_slug(rest));
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\" dir=\"{dir}\">\n\
         <head><meta charset=\"utf-8\"><title>{slug} | Minbar</title></head>\n\
         <body data-page=\"{slug}\" data-locale=\"{lang}\"><div id=\"root\"></div></body>\n\
         </html>\n",
        lang = escape_html(&locale.tag),
        dir = locale.direction.as_str(),
        slug = slug,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;

    #[test]
    fn test_shell_carries_direction() {
        let ar = Locale::new("ar", Direction::Rtl);
        let html = render_shell(&ar, "quran/1");
        assert!(html.contains("<html lang=\"ar\" dir=\"rtl\">"));
        assert!(html.contains("data-page=\"quran/1\""));
    }

    #[test]
    fn test_slug() {
        assert_eq!(page_slug(""), "home");
        assert_eq!(page_slug("/"), "home");
        assert_eq!(page_slug("videos/"), "videos");
    }

    #[test]
    fn test_slug_is_escaped() {
        let en = Locale::new("en", Direction::Ltr);
        let html = render_shell(&en, "<script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
