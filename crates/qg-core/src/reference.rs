use serde::{Deserialize, Serialize};

use crate::model::ArtifactSource;

/// A resolved artifact link. `source == None` exactly when `url` is empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactReference {
    pub url: String,
    pub source: ArtifactSource,
}

impl ArtifactReference {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        !self.source.is_none()
    }
}

/// Candidate inputs for one artifact kind. Blank strings count as absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceRequest<'a> {
    pub explicit_url: Option<&'a str>,
    pub run_url: Option<&'a str>,
    pub artifact_id: Option<&'a str>,
    pub fallback_url: Option<&'a str>,
}

fn present(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

/// Priority: explicit URL, then `<run>/artifacts/<id>`, then fallback, then none.
pub fn resolve_reference(req: &ReferenceRequest<'_>) -> ArtifactReference {
    if let Some(url) = present(req.explicit_url) {
        return ArtifactReference { url: url.to_string(), source: ArtifactSource::Explicit };
    }
    if let (Some(run), Some(id)) = (present(req.run_url), present(req.artifact_id)) {
        return ArtifactReference {
            url: format!("{}/artifacts/{}", run.trim_end_matches('/'), id),
            source: ArtifactSource::RunId,
        };
    }
    if let Some(url) = present(req.fallback_url) {
        return ArtifactReference { url: url.to_string(), source: ArtifactSource::Fallback };
    }
    ArtifactReference::none()
}
