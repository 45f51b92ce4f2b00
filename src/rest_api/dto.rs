//! Response bodies in HAL form

use axum::http::{header, HeaderMap};
use serde::Serialize;

use crate::entity::{Fahrrad, FahrradDocument};

/// Path the bicycle routes are mounted under
pub const API_PATH: &str = "/api";

/// A single hypermedia link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

/// Links of a bicycle; list entries carry only `self`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Link,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove: Option<Link>,
}

/// A bicycle as returned by the read routes
#[derive(Debug, Clone, Serialize)]
pub struct FahrradDto {
    #[serde(flatten)]
    pub fahrrad: Fahrrad,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, Clone, Serialize)]
pub struct Embedded {
    pub bicycles: Vec<FahrradDto>,
}

/// Result of a search
#[derive(Debug, Clone, Serialize)]
pub struct FahrraederDto {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded,
}

impl FahrradDto {
    /// Single record with the full link set
    pub fn full(doc: FahrradDocument, base_uri: &str) -> Self {
        let item = Link {
            href: format!("{}/{}", base_uri, doc.id),
        };
        let collection = Link {
            href: base_uri.to_string(),
        };
        Self {
            fahrrad: doc.fahrrad,
            links: Links {
                self_link: item.clone(),
                list: Some(collection.clone()),
                add: Some(collection),
                update: Some(item.clone()),
                remove: Some(item),
            },
        }
    }

    /// List entry with only `self`
    pub fn entry(doc: FahrradDocument, base_uri: &str) -> Self {
        Self {
            links: Links {
                self_link: Link {
                    href: format!("{}/{}", base_uri, doc.id),
                },
                list: None,
                add: None,
                update: None,
                remove: None,
            },
            fahrrad: doc.fahrrad,
        }
    }
}

impl FahrraederDto {
    pub fn new(docs: Vec<FahrradDocument>, base_uri: &str) -> Self {
        Self {
            embedded: Embedded {
                bicycles: docs
                    .into_iter()
                    .map(|doc| FahrradDto::entry(doc, base_uri))
                    .collect(),
            },
        }
    }
}

/// Absolute URI of the bicycle collection as seen by the client
pub fn base_uri(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("http");
    format!("{}://{}{}", scheme, host, API_PATH)
}
