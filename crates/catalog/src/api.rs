use url::Url;

/// URL builders for the three upstream endpoints.
#[derive(Debug, Clone)]
pub(crate) struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// `GET /api/films/search?keyword=<query>`
    pub fn search(&self, query: &str) -> Url {
        let mut url = self.path(&["api", "films", "search"]);
        url.query_pairs_mut().append_pair("keyword", query);
        url
    }

    /// `GET /api/film/<slug>`
    pub fn detail_by_slug(&self, slug: &str) -> Url {
        self.path(&["api", "film", slug])
    }

    /// `GET /api/film?id=<id>`
    pub fn detail_by_id(&self, id: &str) -> Url {
        let mut url = self.path(&["api", "film"]);
        url.query_pairs_mut().append_pair("id", id);
        url
    }

    /// Endpoint paths are absolute: they replace any path on the base URL.
    fn path(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        // http(s) URLs always have a path to replace.
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url
    }
}
