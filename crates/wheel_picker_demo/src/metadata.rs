//! Link-preview metadata and a sitemap for where the demo is published.
//!
//! Everything here needs absolute links, so it all starts from a [`BaseUrl`].

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

pub const TITLE: &str = "iOS Date Picker for egui";
pub const DESCRIPTION: &str = "A date picker built with egui and iOS-carousel style wheels.";
pub const KEYWORDS: [&str; 4] = ["ios", "date picker", "egui", "wheel picker"];
pub const LOGO_PATH: &str = "/logo.png";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    #[error("No public URL configured. Set PUBLIC_URL to where the demo is hosted")]
    MissingBaseUrl,

    #[error("Invalid public URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Where the demo is hosted. Always `http` or `https` with a host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// # Errors
    /// [`MetadataError::InvalidBaseUrl`] unless `input` is an absolute `http(s)` URL.
    pub fn parse(input: &str) -> Result<Self, MetadataError> {
        let input = input.trim();
        let invalid = |reason: String| MetadataError::InvalidBaseUrl {
            url: input.to_owned(),
            reason,
        };

        let url = Url::parse(input).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }
        if url.host().is_none() {
            return Err(invalid("missing host".to_owned()));
        }
        Ok(Self(url))
    }

    /// `path` resolved against this URL.
    ///
    /// # Errors
    /// [`MetadataError::InvalidBaseUrl`] if the result is not a valid URL.
    pub fn join(&self, path: &str) -> Result<String, MetadataError> {
        self.0
            .join(path)
            .map(String::from)
            .map_err(|err| MetadataError::InvalidBaseUrl {
                url: format!("{}{path}", self.0),
                reason: err.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// What a page says about itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,

    /// Relative to the [`BaseUrl`].
    pub path: String,

    /// Relative to the [`BaseUrl`].
    pub image: String,
}

impl PageMeta {
    /// The demo's only page.
    pub fn home() -> Self {
        Self {
            title: TITLE.to_owned(),
            description: DESCRIPTION.to_owned(),
            keywords: KEYWORDS.iter().map(|&keyword| keyword.to_owned()).collect(),
            path: "/".to_owned(),
            image: LOGO_PATH.to_owned(),
        }
    }
}

/// Everything link unfurlers and home-screen shortcuts look for.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPreview {
    pub application_name: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub metadata_base: String,
    pub alternates: Alternates,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub apple_web_app: AppleWebApp,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Alternates {
    pub canonical: String,

    /// Language tag → URL.
    pub languages: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub site_name: String,
    pub images: Vec<PreviewImage>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PreviewImage {
    pub url: String,
    pub alt: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppleWebApp {
    pub capable: bool,
    pub status_bar_style: String,
    pub title: String,
    pub startup_image: Vec<String>,
}

/// # Errors
/// If the page's paths can't be joined onto `base`.
pub fn link_preview(page: &PageMeta, base: &BaseUrl) -> Result<LinkPreview, MetadataError> {
    let url = base.join(&page.path)?;
    let image = base.join(&page.image)?;

    Ok(LinkPreview {
        application_name: TITLE.to_owned(),
        title: page.title.clone(),
        description: page.description.clone(),
        keywords: page.keywords.clone(),
        metadata_base: base.as_str().to_owned(),
        alternates: Alternates {
            canonical: url.clone(),
            languages: BTreeMap::from([("en".to_owned(), url.clone())]),
        },
        open_graph: OpenGraph {
            kind: "website".to_owned(),
            url,
            title: page.title.clone(),
            description: page.description.clone(),
            site_name: TITLE.to_owned(),
            images: vec![PreviewImage {
                url: image.clone(),
                alt: page.title.clone(),
            }],
        },
        twitter: TwitterCard {
            card: "summary".to_owned(),
            title: page.title.clone(),
            description: page.description.clone(),
            images: vec![image.clone()],
        },
        apple_web_app: AppleWebApp {
            capable: true,
            status_bar_style: "default".to_owned(),
            title: page.title.clone(),
            startup_image: vec![image],
        },
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,

    /// `0.0..=1.0`
    pub priority: f32,
    pub images: Vec<String>,
}

/// One entry for the home page, modified `now`.
///
/// # Errors
/// If the page's paths can't be joined onto `base`.
pub fn sitemap(base: &BaseUrl, now: DateTime<Utc>) -> Result<Vec<SitemapEntry>, MetadataError> {
    let home = PageMeta::home();
    Ok(vec![SitemapEntry {
        url: base.join(&home.path)?,
        last_modified: now,
        priority: 1.0,
        images: vec![base.join(&home.image)?],
    }])
}

/// The sitemap protocol's XML, with the image extension.
pub fn sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#).ok();
    writeln!(
        xml,
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">"#
    )
    .ok();
    for entry in entries {
        writeln!(xml, "<url>").ok();
        writeln!(xml, "<loc>{}</loc>", escape_xml(&entry.url)).ok();
        for image in &entry.images {
            writeln!(
                xml,
                "<image:image>\n<image:loc>{}</image:loc>\n</image:image>",
                escape_xml(image)
            )
            .ok();
        }
        writeln!(
            xml,
            "<lastmod>{}</lastmod>",
            entry
                .last_modified
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        )
        .ok();
        writeln!(xml, "<priority>{}</priority>", entry.priority.clamp(0.0, 1.0)).ok();
        writeln!(xml, "</url>").ok();
    }
    writeln!(xml, "</urlset>").ok();
    xml
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
