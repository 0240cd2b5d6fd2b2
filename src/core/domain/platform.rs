//! Platform type.
//!
//! The fixed set of services whose credentials hutch manages, together with
//! each platform's static env key schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A supported social platform.
///
/// Declaration order is the order used for listings and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linkedin,
    X,
    Tiktok,
    Youtube,
    Facebook,
    Reddit,
}

/// An optional platform-specific field and the env key it exports to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraField {
    /// Field name in the account store (e.g. `apiKey`)
    pub name: &'static str,
    /// Exported env key (e.g. `X_API_KEY`)
    pub env_key: &'static str,
    /// Prompt label for interactive callers
    pub label: &'static str,
}

const X_FIELDS: &[ExtraField] = &[
    ExtraField {
        name: "apiKey",
        env_key: "X_API_KEY",
        label: "API key",
    },
    ExtraField {
        name: "apiSecret",
        env_key: "X_API_SECRET",
        label: "API secret",
    },
];

const YOUTUBE_FIELDS: &[ExtraField] = &[
    ExtraField {
        name: "clientId",
        env_key: "YOUTUBE_CLIENT_ID",
        label: "OAuth client ID",
    },
    ExtraField {
        name: "clientSecret",
        env_key: "YOUTUBE_CLIENT_SECRET",
        label: "OAuth client secret",
    },
];

const FACEBOOK_FIELDS: &[ExtraField] = &[
    ExtraField {
        name: "appId",
        env_key: "FACEBOOK_APP_ID",
        label: "App ID",
    },
    ExtraField {
        name: "appSecret",
        env_key: "FACEBOOK_APP_SECRET",
        label: "App secret",
    },
];

impl Platform {
    /// Every supported platform, in declaration order.
    pub const ALL: [Platform; 6] = [
        Platform::Linkedin,
        Platform::X,
        Platform::Tiktok,
        Platform::Youtube,
        Platform::Facebook,
        Platform::Reddit,
    ];

    /// Identifier used in the store file and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::X => "x",
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
            Platform::Facebook => "facebook",
            Platform::Reddit => "reddit",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Linkedin => "LinkedIn",
            Platform::X => "X (Twitter)",
            Platform::Tiktok => "TikTok",
            Platform::Youtube => "YouTube",
            Platform::Facebook => "Facebook",
            Platform::Reddit => "Reddit",
        }
    }

    /// Env key holding the username.
    pub fn username_key(self) -> &'static str {
        match self {
            Platform::Linkedin => "LINKEDIN_USERNAME",
            Platform::X => "X_USERNAME",
            Platform::Tiktok => "TIKTOK_USERNAME",
            Platform::Youtube => "YOUTUBE_USERNAME",
            Platform::Facebook => "FACEBOOK_USERNAME",
            Platform::Reddit => "REDDIT_USERNAME",
        }
    }

    /// Env key holding the decrypted password.
    pub fn password_key(self) -> &'static str {
        match self {
            Platform::Linkedin => "LINKEDIN_PASSWORD",
            Platform::X => "X_PASSWORD",
            Platform::Tiktok => "TIKTOK_PASSWORD",
            Platform::Youtube => "YOUTUBE_PASSWORD",
            Platform::Facebook => "FACEBOOK_PASSWORD",
            Platform::Reddit => "REDDIT_PASSWORD",
        }
    }

    /// Optional fields this platform accepts, in export order.
    pub fn extra_fields(self) -> &'static [ExtraField] {
        match self {
            Platform::X => X_FIELDS,
            Platform::Youtube => YOUTUBE_FIELDS,
            Platform::Facebook => FACEBOOK_FIELDS,
            Platform::Linkedin | Platform::Tiktok | Platform::Reddit => &[],
        }
    }

    /// Look up an optional field by its store name.
    pub fn extra_field(self, name: &str) -> Option<&'static ExtraField> {
        self.extra_fields().iter().find(|f| f.name == name)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.id() == wanted)
            .ok_or_else(|| ValidationError::UnknownPlatform(s.to_string()))
    }
}
