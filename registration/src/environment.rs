//! Injected collaborators for the registration reducer.

use crate::config::Config;
use crate::enrollment::{EnrollmentSource, HttpEnrollmentSource};
use crate::error::ConfigError;
use crate::submitter::{HttpRegistrationSink, RegistrationSink};
use crate::summarizer::{ClaudeItineraryWriter, ItinerarySummarizer};
use pd_registration_anthropic::AnthropicClient;
use pd_registration_core::environment::{Clock, SystemClock};
use std::sync::Arc;

/// Everything the reducer's effects talk to
#[derive(Clone)]
pub struct RegistrationEnvironment {
    /// Stamps submissions
    pub clock: Arc<dyn Clock>,
    /// Live enrollment counts, if configured
    pub enrollment: Option<Arc<dyn EnrollmentSource>>,
    /// Itinerary writing with fallback
    pub summarizer: ItinerarySummarizer,
    /// Registration delivery
    pub sink: Arc<dyn RegistrationSink>,
}

impl RegistrationEnvironment {
    /// Creates an environment with no enrollment source
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        summarizer: ItinerarySummarizer,
        sink: Arc<dyn RegistrationSink>,
    ) -> Self {
        Self {
            clock,
            enrollment: None,
            summarizer,
            sink,
        }
    }

    /// Builder: fetch live enrollment from `source`
    #[must_use]
    pub fn with_enrollment(mut self, source: Arc<dyn EnrollmentSource>) -> Self {
        self.enrollment = Some(source);
        self
    }

    /// Production wiring from configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the shared HTTP client can't be built.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let summarizer = match &config.itinerary.api_key {
            Some(api_key) => {
                let client = AnthropicClient::new(api_key.clone()).with_http_client(http.clone());
                ItinerarySummarizer::new(Arc::new(ClaudeItineraryWriter::new(
                    client,
                    config.itinerary.model.clone(),
                    config.itinerary.max_tokens,
                    config.itinerary.organization.clone(),
                )))
            },
            None => {
                tracing::info!("ANTHROPIC_API_KEY not set, itineraries will use the local summary");
                ItinerarySummarizer::offline()
            },
        };

        let sink = HttpRegistrationSink::new(http.clone(), config.registration.endpoint_url.clone())
            .with_unconfigured_delay(config.unconfigured_delay());
        if !sink.is_configured() {
            tracing::warn!("REGISTRATION_ENDPOINT_URL is not configured, submissions will fail");
        }

        let environment = Self::new(Arc::new(SystemClock), summarizer, Arc::new(sink));

        Ok(match &config.enrollment_url {
            Some(url) => environment.with_enrollment(Arc::new(HttpEnrollmentSource::new(http, url.clone()))),
            None => environment,
        })
    }
}

impl std::fmt::Debug for RegistrationEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationEnvironment")
            .field("has_enrollment_source", &self.enrollment.is_some())
            .field("summarizer", &self.summarizer)
            .finish_non_exhaustive()
    }
}
