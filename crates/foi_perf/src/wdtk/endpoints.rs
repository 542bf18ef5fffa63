//! URL construction for the two WDTK endpoints.

use url::Url;

const BODY_SEGMENT: &str = "body";
const DIRECTORY_FILE: &str = "all-authorities.csv";

/// `{base}/body/all-authorities.csv`
pub fn directory_url(base: &Url) -> Url {
    with_body_segment(base, DIRECTORY_FILE)
}

/// `{base}/body/{code}.json`. The code is percent-encoded only where a path
/// segment requires it (`/`, `%`, spaces, ...).
pub fn body_url(base: &Url, code: &str) -> Url {
    with_body_segment(base, &format!("{code}.json"))
}

fn with_body_segment(base: &Url, file: &str) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    // Base URLs are checked for `cannot_be_a_base` when the fetcher is built.
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(BODY_SEGMENT).push(file);
    }
    url
}
