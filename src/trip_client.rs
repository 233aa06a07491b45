//! Client for the third-party trip-data service.
//!
//! One unauthenticated JSON POST per call. No retry, no timeout beyond the
//! connector's defaults.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::Uri;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use crate::error::Error;
use crate::model::{TripRequest, TripResponse};

/// Shared handle to the trip-data service. Cheap to clone.
#[derive(Clone, Debug)]
pub struct TripClient {
    uri: Uri,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl TripClient {
    pub fn new(url: &str) -> Result<Self, Error> {
        let uri = url.parse::<Uri>().map_err(|source| Error::InvalidUri {
            uri: url.to_owned(),
            source,
        })?;
        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self { uri, client })
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Posts `request` and decodes the service's answer.
    pub async fn fetch(&self, request: &TripRequest) -> Result<TripResponse, Error> {
        let body = serde_json::to_vec(request)?;
        let outbound = http::Request::post(self.uri.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))?;

        let response = self.client.request(outbound).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        debug!(status = status.as_u16(), body = %String::from_utf8_lossy(&bytes), "trip service answered");

        if !status.is_success() {
            return Err(Error::UpstreamStatus(status.as_u16()));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
