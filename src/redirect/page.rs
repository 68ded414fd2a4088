use crate::redirect::{extract_next, QueryParams, RESERVED_PARAMS};

/// Read-only view of the query string of the page a login was started from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    query: String,
}

impl PageContext {
    pub fn new(query: impl Into<String>) -> Self {
        PageContext {
            query: query.into(),
        }
    }

    pub fn next(&self) -> Option<String> {
        extract_next(&self.query)
    }

    /// Incoming parameters that may travel on to the identity provider.
    ///
    /// Reserved OAuth parameters and the redirect-preservation fields never do, so the outgoing
    /// URL keeps exactly one value for each of them. A repeated key keeps its first value, as
    /// `next` does.
    pub fn forwardable_params(&self) -> QueryParams {
        let mut forwarded = QueryParams::new();
        for (key, value) in parse_pairs(&self.query) {
            if !RESERVED_PARAMS.contains(&key.as_str()) {
                forwarded.set_if_absent(key, value);
            }
        }
        forwarded
    }
}

pub(crate) fn parse_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_default()
}
