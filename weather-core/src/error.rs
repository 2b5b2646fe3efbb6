use reqwest::StatusCode;

/// Failure of a single weather lookup.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("HTTP error occurred: 404 Not Found for city '{city}'")]
    CityNotFound { city: String },

    #[error("HTTP error occurred: 401 Unauthorized")]
    InvalidApiKey,

    #[error("HTTP error occurred: {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Error connecting to API: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WeatherError {
    /// Short advice shown to the user below the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            WeatherError::CityNotFound { .. } => Some("City not found. Check spelling!"),
            WeatherError::InvalidApiKey => Some("Invalid API key."),
            WeatherError::Request(_) => Some("Check the city name or your internet connection."),
            WeatherError::Status { .. } | WeatherError::Decode(_) => None,
        }
    }
}
