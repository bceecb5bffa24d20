//! Raw transport responses and the decoded TR response model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::TrError;

/// Protocol convention: `rt_cd == "0"` means the call succeeded.
pub const SUCCESS_RT_CD: &str = "0";

/// What a transport hands back for one GET: status, headers, and body bytes.
///
/// Header names are stored lower-cased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    headers: HashMap<String, String>,
    /// Undecoded response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Build a raw response; header names are normalized to lower case.
    pub fn new<I, K, V>(status: u16, headers: I, body: impl Into<Vec<u8>>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
            .collect();
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Convenience for a 200 response with a JSON body.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        Self::new(
            200,
            [("content-type", "application/json; charset=utf-8")],
            value.to_string(),
        )
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turn a non-2xx response into an `Http` error.
    ///
    /// # Errors
    /// Returns `TrError::Http` carrying the status and body text.
    pub fn error_for_status(self) -> Result<Self, TrError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TrError::http(self.status, self.text()))
        }
    }
}

/// Response headers the protocol cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseHeader {
    /// `content-type`
    pub content_type: Option<String>,
    /// `tr_id`: echo of the operation id.
    pub tr_id: Option<String>,
    /// `tr_cont`: continuation flag for paged results.
    pub tr_cont: Option<String>,
    /// `gt_uid`: global trace id.
    pub gt_uid: Option<String>,
}

impl ResponseHeader {
    /// Pick the protocol headers out of a raw response.
    #[must_use]
    pub fn from_raw(raw: &RawResponse) -> Self {
        let get = |name: &str| raw.header(name).map(str::to_string);
        Self {
            content_type: get("content-type"),
            tr_id: get("tr_id"),
            tr_cont: get("tr_cont"),
            gt_uid: get("gt_uid"),
        }
    }
}

/// Decoded result of one TR call.
///
/// The shape is the same for every TR; what `output1` and `output2` mean is up
/// to the individual operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrResponse {
    /// Selected response headers.
    pub header: ResponseHeader,
    /// Status code, `"0"` on success.
    pub rt_cd: String,
    /// Message code.
    pub msg_cd: String,
    /// Human-readable message.
    pub msg1: String,
    /// Primary payload: an object or a list of rows, depending on the TR.
    pub output1: Option<Value>,
    /// Secondary payload, same shape rules as `output1`.
    pub output2: Option<Value>,
}

impl TrResponse {
    /// Decode a raw transport response.
    ///
    /// Missing status/message fields become empty strings and missing or `null`
    /// output sections become `None`. Sections are kept as sent (object, array,
    /// or scalar); only a body that is not a JSON object fails.
    ///
    /// # Errors
    /// Returns `TrError::Decode` when the body is not structured data.
    pub fn from_raw(raw: &RawResponse) -> Result<Self, TrError> {
        let value: Value = serde_json::from_slice(&raw.body)?;
        let Value::Object(mut body) = value else {
            return Err(TrError::Decode(
                "response body is not a JSON object".to_string(),
            ));
        };

        Ok(Self {
            header: ResponseHeader::from_raw(raw),
            rt_cd: text_field(&body, "rt_cd"),
            msg_cd: text_field(&body, "msg_cd"),
            msg1: text_field(&body, "msg1"),
            output1: section(&mut body, "output1"),
            output2: section(&mut body, "output2"),
        })
    }

    /// True when `rt_cd` signals success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.rt_cd == SUCCESS_RT_CD
    }

    /// The application-level failure carried by this response, if any.
    #[must_use]
    pub fn status_error(&self) -> Option<TrError> {
        (!self.is_success()).then(|| TrError::status(&self.msg_cd, &self.msg1))
    }
}

/// Render a JSON value as text; `null` yields `None`.
#[must_use]
pub fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn text_field(body: &Map<String, Value>, key: &str) -> String {
    body.get(key).and_then(value_text).unwrap_or_default()
}

fn section(body: &mut Map<String, Value>, key: &str) -> Option<Value> {
    body.remove(key).filter(|v| !v.is_null())
}
