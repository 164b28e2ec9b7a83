//! Response body streaming.
//! Mirrors Chromium's HttpStream::ReadResponseBody.

use crate::base::neterror::NetError;
use bytes::{Bytes, BytesMut};
use http2::RecvStream;
use hyper::body::Incoming;

/// Either protocol's raw body stream. H1 bodies come through hyper's
/// `Incoming`; H2 bodies come through the forked `http2` crate's
/// `RecvStream`, which needs explicit flow-control capacity release as data
/// is consumed.
enum BodyInner {
    H1(Incoming),
    H2(RecvStream),
}

/// Response body wrapper for streaming.
pub struct ResponseBody {
    inner: BodyInner,
}

impl ResponseBody {
    /// Create a new response body wrapper over an H1 body.
    pub fn new(inner: Incoming) -> Self {
        Self { inner: BodyInner::H1(inner) }
    }

    /// Create a new response body wrapper over an H2 body.
    pub fn new_h2(inner: RecvStream) -> Self {
        Self { inner: BodyInner::H2(inner) }
    }

    /// Read entire body as bytes.
    pub async fn bytes(self) -> Result<Bytes, NetError> {
        match self.inner {
            BodyInner::H1(incoming) => {
                use http_body_util::BodyExt;
                let collected = incoming.collect().await.map_err(|_| NetError::HttpBodyError)?;
                Ok(collected.to_bytes())
            }
            BodyInner::H2(mut stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.data().await {
                    let chunk = chunk.map_err(|_| NetError::HttpBodyError)?;
                    let len = chunk.len();
                    buf.extend_from_slice(&chunk);
                    let _ = stream.flow_control().release_capacity(len);
                }
                Ok(buf.freeze())
            }
        }
    }

    /// Read body as UTF-8 string.
    pub async fn text(self) -> Result<String, NetError> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|_| NetError::InvalidUtf8)
    }

    /// Read body as JSON, deserializing to type T.
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> Result<T, NetError> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|_| NetError::JsonParseError)
    }
}
