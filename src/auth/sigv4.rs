//! AWS Signature Version 4 for JSON POST requests.
//!
//! # Data Flow
//! ```text
//! PostRequest (url, content type, body bytes)
//!     → canonical request (method, path, query, signed headers, body hash)
//!     → string to sign (algorithm, timestamp, scope, hash of canonical request)
//!     → HMAC chain: secret → date → region → service → "aws4_request"
//!     → Authorization + X-Amz-Date headers appended to the request
//! ```

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use url::Url;

use crate::providers::ProviderError;
use crate::transport::PostRequest;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Key material and scope for one signature.
#[derive(Debug, Clone, Copy)]
pub struct SigningParams<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub session_token: Option<&'a str>,
    pub region: &'a str,
    pub service: &'a str,
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>, ProviderError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| ProviderError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Derive the signing key for `date` (`YYYYMMDD`).
pub fn signing_key(
    secret_access_key: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, ProviderError> {
    let k_date = hmac(format!("AWS4{secret_access_key}").as_bytes(), date.as_bytes())?;
    let k_region = hmac(&k_date, region.as_bytes())?;
    let k_service = hmac(&k_region, service.as_bytes())?;
    hmac(&k_service, b"aws4_request")
}

/// RFC 3986 encoding with the unreserved set AWS expects.
fn uri_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn canonical_path(url: &Url) -> String {
    let path = url.path();
    if path.is_empty() {
        return "/".to_string();
    }
    path.split('/').map(uri_encode).collect::<Vec<_>>().join("/")
}

fn canonical_query(url: &Url) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (uri_encode(&k), uri_encode(&v)))
        .collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn host_header(url: &Url) -> Result<String, ProviderError> {
    let host = url
        .host_str()
        .ok_or_else(|| ProviderError::Signing(format!("no host in {url}")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Sign `request` as of `now`, returning it with the auth headers attached.
pub fn sign(
    request: PostRequest,
    params: &SigningParams<'_>,
    now: DateTime<Utc>,
) -> Result<PostRequest, ProviderError> {
    let url = Url::parse(&request.url).map_err(|e| ProviderError::Signing(e.to_string()))?;
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = now.format("%Y%m%d").to_string();

    let mut headers = vec![
        ("content-type", request.content_type.to_string()),
        ("host", host_header(&url)?),
        ("x-amz-date", amz_date.clone()),
    ];
    if let Some(token) = params.session_token {
        headers.push(("x-amz-security-token", token.to_string()));
    }

    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{}\n", value.trim()))
        .collect();
    let signed_headers = headers
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = format!(
        "POST\n{}\n{}\n{}\n{}\n{}",
        canonical_path(&url),
        canonical_query(&url),
        canonical_headers,
        signed_headers,
        sha256_hex(&request.body),
    );

    let scope = format!("{date}/{}/{}/aws4_request", params.region, params.service);
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    );

    let key = signing_key(params.secret_access_key, &date, params.region, params.service)?;
    let signature = hex::encode(hmac(&key, string_to_sign.as_bytes())?);

    let authorization = format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
        params.access_key_id
    );

    let mut request = request
        .header("X-Amz-Date", amz_date)
        .header("Authorization", authorization);
    if let Some(token) = params.session_token {
        request = request.header("X-Amz-Security-Token", token);
    }
    Ok(request)
}
