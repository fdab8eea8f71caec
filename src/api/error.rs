use thiserror::Error;

/// Flat error taxonomy for the content fetch layer. Every failed call maps
/// to one variant carrying the attempted action and the resource name; the
/// banner string a user sees comes from [`ApiError::message`].
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("failed to {action} {resource}: backend returned {status}")]
    Status {
        action: &'static str,
        resource: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("failed to {action} {resource}")]
    Network {
        action: &'static str,
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {resource}")]
    Decode {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// The generic human-readable string shown in the status banner,
    /// e.g. "Failed to fetch projects" or "Failed to update hero section".
    pub fn message(&self) -> String {
        match self {
            ApiError::Status {
                action, resource, ..
            }
            | ApiError::Network {
                action, resource, ..
            } => format!("Failed to {action} {resource}"),
            ApiError::Decode { resource, .. } => format!("Failed to decode {resource}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_message_is_generic() {
        let err = ApiError::Status {
            action: "fetch",
            resource: "projects",
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.message(), "Failed to fetch projects");
    }
}
