use std::path::{Component, Path, PathBuf};

pub(super) fn default_permalink(dir: &Path, file_slug: &str) -> String {
    let mut url = String::from("/");
    for c in dir.components() {
        if let Component::Normal(name) = c {
            url.push_str(&name.to_string_lossy());
            url.push('/');
        }
    }
    url.push_str(file_slug);
    url.push('/');
    url
}

/// `/blog/x/` is written to `out/blog/x/index.html`, `/feed.xml` to `out/feed.xml`.
pub(super) fn output_path(out_dir: &Path, permalink: &str) -> PathBuf {
    let mut path = out_dir.to_path_buf();
    // never leave out_dir
    for segment in permalink
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
    {
        path.push(segment);
    }
    if permalink.ends_with('/') {
        path.push("index.html");
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_permalink_follows_directories() {
        assert_eq!(default_permalink(Path::new(""), "about"), "/about/");
        assert_eq!(
            default_permalink(Path::new("pages/contact"), "form"),
            "/pages/contact/form/"
        );
    }

    #[test]
    fn directory_permalinks_get_index() {
        assert_eq!(
            output_path(Path::new("out"), "/blog/why-i-joined-ema/"),
            PathBuf::from("out/blog/why-i-joined-ema/index.html")
        );
        assert_eq!(
            output_path(Path::new("out"), "/blog//"),
            PathBuf::from("out/blog/index.html")
        );
    }

    #[test]
    fn file_permalinks_are_kept() {
        assert_eq!(
            output_path(Path::new("out"), "/feed.xml"),
            PathBuf::from("out/feed.xml")
        );
    }

    #[test]
    fn parent_segments_are_dropped() {
        assert_eq!(
            output_path(Path::new("out"), "/../../etc/passwd"),
            PathBuf::from("out/etc/passwd")
        );
    }
}
