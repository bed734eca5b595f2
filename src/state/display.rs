//! Renderable view of a banner.
//!
//! [`BannerView`] is what the presentation layer consumes: the render-state tag
//! plus only the fields that state needs. Mapping it to markup or terminal output
//! happens elsewhere.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BannerState, RenderState};
use crate::common::constants::{EXPIRED_SUFFIX, FALLBACK_HEADER_ALT, FALLBACK_TITLE};

/// Text and media configuration that does not influence the decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerContent {
    pub title_text: Option<String>,
    pub collapsed_label: Option<String>,
    pub header_image_url: Option<String>,
    pub header_image_alt: Option<String>,

    pub quote_text: Option<String>,
    pub reflection_header: Option<String>,
    pub reflection_text: Option<String>,
    pub core_behavior_text: Option<String>,
    pub core_behavior_url: Option<String>,

    pub sig_left_name: Option<String>,
    pub sig_left_title: Option<String>,
    pub sig_right_name: Option<String>,
    pub sig_right_title: Option<String>,

    pub mid_image_url: Option<String>,
    pub mid_image_alt: Option<String>,
    pub footer_image_url: Option<String>,
    pub footer_image_alt: Option<String>,

    pub diagnostics_enabled: bool,
}

impl BannerContent {
    fn title(&self) -> &str {
        non_empty(self.title_text.as_deref()).unwrap_or(FALLBACK_TITLE)
    }

    fn collapsed_label(&self) -> &str {
        non_empty(self.collapsed_label.as_deref()).unwrap_or_else(|| self.title())
    }

    /// Body of the fully expanded banner. Empty fields are left out.
    fn body(&self) -> BannerBody {
        let core_behavior = match (
            non_empty(self.core_behavior_text.as_deref()),
            non_empty(self.core_behavior_url.as_deref()),
        ) {
            (None, None) => None,
            (text, url) => Some(Link {
                // A bare URL is its own link text
                text: text.or(url).unwrap_or_default().to_string(),
                url: url.map(str::to_string),
            }),
        };

        let signatures = [
            (&self.sig_left_name, &self.sig_left_title),
            (&self.sig_right_name, &self.sig_right_title),
        ]
        .into_iter()
        .filter_map(|(name, title)| {
            Some(Signature {
                name: non_empty(name.as_deref())?.to_string(),
                title: owned(title.as_deref()),
            })
        })
        .collect();

        BannerBody {
            quote: owned(self.quote_text.as_deref()),
            reflection_header: owned(self.reflection_header.as_deref()),
            reflection_text: owned(self.reflection_text.as_deref()),
            core_behavior,
            signatures,
            mid_image: Image::from_parts(self.mid_image_url.as_deref(), self.mid_image_alt.as_deref()),
            footer_image: Image::from_parts(
                self.footer_image_url.as_deref(),
                self.footer_image_alt.as_deref(),
            ),
        }
    }
}

/// Link text and optional target.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub title: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    /// Empty when no alt text is configured.
    pub alt: String,
}

impl Image {
    fn from_parts(url: Option<&str>, alt: Option<&str>) -> Option<Self> {
        Some(Self {
            url: non_empty(url)?.trim().to_string(),
            alt: alt.map(str::trim).unwrap_or_default().to_string(),
        })
    }
}

/// Content shown only while the banner is fully expanded.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct BannerBody {
    pub quote: Option<String>,
    pub reflection_header: Option<String>,
    pub reflection_text: Option<String>,
    pub core_behavior: Option<Link>,
    /// Left signature first; a signature without a name is omitted.
    pub signatures: Vec<Signature>,
    pub mid_image: Option<Image>,
    pub footer_image: Option<Image>,
}

/// Collapse control offered alongside the banner.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum CollapseAffordance {
    Expand,
    Collapse,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub state: RenderState,
    /// Banner text: the expired stub, the collapsed label, or the title.
    pub text: Option<String>,
    pub affordance: Option<CollapseAffordance>,
    /// Normalized header image, only while fully expanded.
    pub header_image_url: Option<String>,
    /// Alt text for the header image, present together with it.
    pub header_image_alt: Option<String>,
    pub body: Option<BannerBody>,
    /// Internal diagnostic report, present only when diagnostics are enabled.
    pub diagnostics: Option<String>,
}

impl BannerView {
    pub fn build(state: &BannerState, content: &BannerContent, now: DateTime<Utc>) -> Self {
        let render_state = state.render_state();
        let diagnostics = content
            .diagnostics_enabled
            .then(|| super::diagnostics::diagnostic_report(state, content, now));

        let mut view = Self {
            state: render_state,
            text: None,
            affordance: None,
            header_image_url: None,
            header_image_alt: None,
            body: None,
            diagnostics,
        };

        match render_state {
            RenderState::FullyHidden => {}
            RenderState::ExpiredBanner => {
                view.text = Some(format!("{} {EXPIRED_SUFFIX}", content.title()));
            }
            RenderState::UserCollapsed => {
                view.text = Some(content.collapsed_label().to_string());
                view.affordance = Some(CollapseAffordance::Expand);
            }
            RenderState::FullyExpanded => {
                view.text = Some(content.title().to_string());
                view.affordance = state
                    .display()
                    .allow_collapse
                    .then_some(CollapseAffordance::Collapse);
                view.header_image_url = normalize_image_url(content.header_image_url.as_deref());
                if view.header_image_url.is_some() {
                    view.header_image_alt = Some(
                        non_empty(content.header_image_alt.as_deref())
                            .unwrap_or(FALLBACK_HEADER_ALT)
                            .to_string(),
                    );
                }
                view.body = Some(content.body());
            }
        }

        view
    }

    /// True when nothing at all reaches end users.
    pub fn is_blank(&self) -> bool {
        self.state == RenderState::FullyHidden
    }
}

/// Normalize a header image URL.
///
/// SharePoint sharing links serve an HTML preview page unless `download=1` is
/// present, so it is appended to those. Empty input yields `None`.
pub fn normalize_image_url(url: Option<&str>) -> Option<String> {
    let mut clean = url?.trim().to_string();
    if clean.is_empty() {
        return None;
    }

    let has_query = clean.contains('?');
    let is_sharing_link =
        clean.contains("/:i:/") || clean.contains("/:u:/") || clean.contains("sharepoint.com");

    if is_sharing_link && !clean.to_lowercase().contains("download=1") {
        clean.push_str(if has_query { "&download=1" } else { "?download=1" });
    }

    Some(clean)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn owned(value: Option<&str>) -> Option<String> {
    non_empty(value).map(str::to_string)
}
