use thiserror::Error;

/// Failure of a single gateway call. Transport problems and rejected
/// requests both collapse into one text through [`GatewayError::description`].
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{body}")]
    Status { status: u16, body: String },
    #[error("Invalid gateway URL: {0}")]
    Url(#[from] url::ParseError),
}

impl GatewayError {
    pub fn description(&self) -> String {
        match self {
            Self::Status { status, body } if body.trim().is_empty() => format!("HTTP {}", status),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Url(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_description_is_the_body() {
        let err = GatewayError::Status {
            status: 404,
            body: r#"{"detail":"trade_not_found"}"#.to_string(),
        };
        assert_eq!(err.description(), r#"{"detail":"trade_not_found"}"#);
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn empty_body_falls_back_to_status_code() {
        let err = GatewayError::Status {
            status: 502,
            body: "  ".to_string(),
        };
        assert_eq!(err.description(), "HTTP 502");
    }
}
