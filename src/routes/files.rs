//! Static file routes backed by the configured root directory.

use std::path::{Component, Path, PathBuf};

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    http::Uri,
    response::{Html, IntoResponse, Response},
};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::{error::AppError, state::SharedState};

/// Characters escaped in listing links.
const HREF: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Serve every path that no other route claims from `root`.
///
/// Directories resolve to their `index.html`, or to a generated listing when
/// they have none. Anything else missing becomes a JSON 404.
pub fn router(root: &Path) -> Router<SharedState> {
    let listing_root = root.to_path_buf();
    let fallback = move |uri: Uri| {
        let root = listing_root.clone();
        async move { listing_or_not_found(&root, &uri).await }
    };

    let files = ServeDir::new(root).not_found_service(fallback.into_service());
    Router::<SharedState>::new().fallback_service(files)
}

async fn listing_or_not_found(root: &Path, uri: &Uri) -> Response {
    let not_found = || AppError::NotFound(format!("`{}`", uri.path())).into_response();

    let Some(dir) = resolve_under(root, uri.path()) else {
        return not_found();
    };
    if !tokio::fs::metadata(&dir)
        .await
        .is_ok_and(|meta| meta.is_dir())
    {
        return not_found();
    }

    match render_listing(&dir, uri.path()).await {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            warn!(path = %dir.display(), error = %err, "failed to list directory");
            not_found()
        }
    }
}

/// Map a request path onto `root`, refusing anything that would escape it.
fn resolve_under(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let mut resolved = root.to_path_buf();

    for segment in decoded.split('/').filter(|s| !s.is_empty()) {
        if segment.contains('\\') {
            return None;
        }
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => resolved.push(part),
            (Some(Component::CurDir), None) => {}
            _ => return None,
        }
    }

    Some(resolved)
}

async fn render_listing(dir: &Path, request_path: &str) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut reader = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort_by_key(|name| name.to_lowercase());

    let title = format!("Directory listing for {}", escape_html(request_path));
    let mut page = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for name in &entries {
        page.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            utf8_percent_encode(name, HREF),
            escape_html(name)
        ));
    }
    page.push_str("</ul>\n<hr>\n</body>\n</html>\n");

    Ok(page)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_paths_stay_inside_root() {
        let root = Path::new("/srv/site");
        assert_eq!(
            resolve_under(root, "/docs/a%20b/"),
            Some(PathBuf::from("/srv/site/docs/a b"))
        );
        assert_eq!(resolve_under(root, "/./docs"), Some(PathBuf::from("/srv/site/docs")));
        assert_eq!(resolve_under(root, "/../etc/"), None);
        assert_eq!(resolve_under(root, "/%2e%2e/etc/"), None);
        assert_eq!(resolve_under(root, "/docs%2f..%2f..%2f"), None);
    }

    #[test]
    fn names_are_escaped_in_markup() {
        assert_eq!(escape_html("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
