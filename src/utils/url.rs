use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Path prefix of the search service below the host.
pub const SEARCH_PREFIX: &str = "search";

// Characters that would break out of a single path segment or the index list
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b',');

/// Percent-encode one index name for use inside the index list segment.
///
/// # Examples
///
/// ```
/// use ellinet_search::utils::url::encode_index_name;
///
/// assert_eq!(encode_index_name("edoweb"), "edoweb");
/// assert_eq!(encode_index_name("a/b,c"), "a%2Fb%2Cc");
/// ```
pub fn encode_index_name(name: &str) -> String {
    utf8_percent_encode(name, SEGMENT_ENCODE_SET).to_string()
}

/// Path (below the host) for searching the given indices.
///
/// Names are joined with `,`. With no names the path is `/search/_search`,
/// which is what the page has always sent for an empty selection.
///
/// # Examples
///
/// ```
/// use ellinet_search::utils::url::search_path;
///
/// assert_eq!(search_path(["a", "b"]), "/search/a,b/_search");
/// assert_eq!(search_path(Vec::<&str>::new()), "/search/_search");
/// ```
pub fn search_path<I, S>(indices: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined =
        indices.into_iter().map(|name| encode_index_name(name.as_ref())).collect::<Vec<_>>();
    if joined.is_empty() {
        format!("/{}/_search", SEARCH_PREFIX)
    } else {
        format!("/{}/{}/_search", SEARCH_PREFIX, joined.join(","))
    }
}

/// Path (below the host) of the status endpoint.
pub fn status_path() -> String {
    format!("/{}/_status", SEARCH_PREFIX)
}
