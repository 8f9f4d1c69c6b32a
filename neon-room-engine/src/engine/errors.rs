use std::fmt;

/// Why an imported model could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    /// The asset could not be fetched.
    Network,
    /// The asset was fetched but could not be decoded.
    Parse,
    /// The glTF decoded but carries no scene to instantiate.
    MissingScene,
}

impl LoadFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadFailure::Network => "network",
            LoadFailure::Parse => "parse",
            LoadFailure::MissingScene => "missing_scene",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLoadError {
    pub url: String,
    pub reason: LoadFailure,
    pub detail: String,
}

impl AssetLoadError {
    pub fn new(url: &str, reason: LoadFailure, detail: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            reason,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for AssetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to load {} ({}): {}",
            self.url,
            self.reason.as_str(),
            self.detail
        )
    }
}

impl std::error::Error for AssetLoadError {}

/// Failures reported by the host page for the features it provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    PermissionDenied { feature: String },
    MissingDomTarget { id: String },
    Malformed { feature: String, detail: String },
}

impl CollaboratorError {
    /// Feature affected by the failure, when the host names one.
    pub fn feature(&self) -> Option<&str> {
        match self {
            CollaboratorError::PermissionDenied { feature }
            | CollaboratorError::Malformed { feature, .. } => Some(feature),
            CollaboratorError::MissingDomTarget { .. } => None,
        }
    }
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollaboratorError::PermissionDenied { feature } => {
                write!(f, "permission denied for {feature}")
            }
            CollaboratorError::MissingDomTarget { id } => {
                write!(f, "host element #{id} is missing")
            }
            CollaboratorError::Malformed { feature, detail } => {
                write!(f, "malformed {feature} data: {detail}")
            }
        }
    }
}

impl std::error::Error for CollaboratorError {}
