use thiserror::Error;

/// Failure of a geocoding or weather lookup.
///
/// The `Display` text of each variant is what callers of the HTTP API see, so
/// it carries the provider's own status and message where there is one.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The geocoding provider answered with a status other than `OK`.
    #[error("Error: {status}, {}", .message.as_deref().unwrap_or(""))]
    Geocoding {
        status: String,
        message: Option<String>,
    },

    #[error("Error: OK, geocoding returned no results")]
    NoResults,

    /// The weather provider answered with a non-success HTTP status.
    #[error("Error {status}, {}", .message.as_deref().unwrap_or("Occurred"))]
    Weather {
        status: u16,
        message: Option<String>,
    },

    /// Network or HTTP failure. The request URL is stripped on construction
    /// because its query string carries the provider API key.
    #[error("{}", transport_message(.0))]
    Transport(reqwest::Error),

    #[error("{0}")]
    Payload(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// `err` followed by its source chain, e.g.
/// `error sending request: client error (Connect): tcp connect error: Connection refused`.
fn transport_message(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

/// Problems building a [`Config`](crate::Config) at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting '{0}'. Set it in the environment or the config file.")]
    MissingKey(&'static str),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocoding_error_embeds_status_and_message() {
        let err = LookupError::Geocoding {
            status: "REQUEST_DENIED".into(),
            message: Some("The provided API key is invalid.".into()),
        };
        assert_eq!(
            err.to_string(),
            "Error: REQUEST_DENIED, The provided API key is invalid."
        );
    }

    #[test]
    fn geocoding_error_without_message() {
        let err = LookupError::Geocoding {
            status: "ZERO_RESULTS".into(),
            message: None,
        };
        assert_eq!(err.to_string(), "Error: ZERO_RESULTS, ");
    }

    #[test]
    fn weather_error_falls_back_to_generic_text() {
        let err = LookupError::Weather {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "Error 502, Occurred");

        let err = LookupError::Weather {
            status: 401,
            message: Some("Invalid API key".into()),
        };
        assert_eq!(err.to_string(), "Error 401, Invalid API key");
    }

    #[test]
    fn payload_error_keeps_parser_message() {
        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let expected = parse.to_string();
        let err = LookupError::from(parse);
        assert_eq!(err.to_string(), expected);
    }
}
