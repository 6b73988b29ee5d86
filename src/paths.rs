//! Base-directory derivation and URL joining for cue sources and image
//! references.

/// Everything up to and including the last `/`, or an empty string when
/// there is none.
pub fn directory_of(url: &str) -> &str {
    match url.rfind('/') {
        Some(idx) => &url[..=idx],
        None => "",
    }
}

/// Directory of the page URL (scheme, host, port and path), without query
/// string or fragment.
pub fn page_base_url(page_url: &str) -> &str {
    let end = page_url.find(['?', '#']).unwrap_or(page_url.len());
    directory_of(&page_url[..end])
}

/// Join `path` onto `base` unless `path` is already absolute or
/// scheme-relative.
pub fn fully_qualified_url(path: &str, base: &str) -> String {
    if path.contains("//") {
        return path.to_string();
    }

    if base.starts_with("//") {
        let base = base.strip_suffix('/').unwrap_or(base);
        return format!("{}/{}", base, path.trim_matches('/'));
    }

    if base.contains("//") {
        return format!("{}/{}", base.trim_matches('/'), path.trim_matches('/'));
    }

    path.to_string()
}

/// Base directory that image references in a cue file are relative to.
/// Sources without their own scheme or host hang off the page directory.
pub fn cue_base_dir(src: &str, page_base: &str) -> String {
    if src.contains("//") {
        directory_of(src).to_string()
    } else {
        format!("{}{}", page_base, directory_of(src))
    }
}

/// Resolves image references found in one cue file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlResolver {
    base_dir: String,
}

impl UrlResolver {
    pub fn new(base_dir: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolver for references inside the cue file at `src`, with `page_url`
    /// as the fallback location for host-less sources.
    pub fn for_source(src: &str, page_url: &str) -> Self {
        Self::new(cue_base_dir(src, page_base_url(page_url)))
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn resolve(&self, reference: &str) -> String {
        fully_qualified_url(reference, &self.base_dir)
    }
}

/// Fully qualified URL of the cue file itself.
pub fn resolve_source(src: &str, page_url: &str) -> String {
    fully_qualified_url(src, page_base_url(page_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_of() {
        assert_eq!(directory_of("http://a.com/vtt/thumbs.vtt"), "http://a.com/vtt/");
        assert_eq!(directory_of("thumbs.vtt"), "");
        assert_eq!(directory_of("/thumbs.vtt"), "/");
    }

    #[test]
    fn test_page_base_url_drops_query() {
        assert_eq!(
            page_base_url("https://site.tv:8080/watch/index.html?v=1#t=3"),
            "https://site.tv:8080/watch/"
        );
    }

    #[test]
    fn test_relative_reference_joins_source_directory() {
        let resolver = UrlResolver::for_source("http://a.com/vtt/thumbs.vtt", "http://page.com/");
        assert_eq!(resolver.resolve("thumb.jpg"), "http://a.com/vtt/thumb.jpg");
    }

    #[test]
    fn test_qualified_reference_is_verbatim() {
        let resolver = UrlResolver::new("http://a.com/vtt/");
        assert_eq!(
            resolver.resolve("https://cdn.com/sheet.jpg#xywh=0,0,1,1"),
            "https://cdn.com/sheet.jpg#xywh=0,0,1,1"
        );
        assert_eq!(resolver.resolve("//cdn.com/s.jpg"), "//cdn.com/s.jpg");
    }

    #[test]
    fn test_scheme_relative_base() {
        assert_eq!(
            fully_qualified_url("/img/a.jpg", "//cdn.com/vtt/"),
            "//cdn.com/vtt/img/a.jpg"
        );
    }

    #[test]
    fn test_redundant_slashes_trimmed_at_join() {
        assert_eq!(
            fully_qualified_url("/a.jpg/", "http://a.com/vtt//"),
            "http://a.com/vtt/a.jpg"
        );
    }

    #[test]
    fn test_hostless_base_leaves_path_alone() {
        assert_eq!(fully_qualified_url("a.jpg", "vtt/"), "a.jpg");
        assert_eq!(fully_qualified_url("a.jpg", ""), "a.jpg");
    }

    #[test]
    fn test_hostless_source_uses_page_directory() {
        let resolver = UrlResolver::for_source("media/thumbs.vtt", "http://site.com/watch/page.html");
        assert_eq!(resolver.base_dir(), "http://site.com/watch/media/");
        assert_eq!(resolver.resolve("t1.jpg"), "http://site.com/watch/media/t1.jpg");
    }

    #[test]
    fn test_resolve_source() {
        assert_eq!(
            resolve_source("thumbs.vtt", "http://site.com/watch/page.html"),
            "http://site.com/watch/thumbs.vtt"
        );
        assert_eq!(
            resolve_source("https://cdn.com/t.vtt", "http://site.com/"),
            "https://cdn.com/t.vtt"
        );
    }
}
