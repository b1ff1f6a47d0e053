use crate::error::RequestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    SocialShort,
    LongFormVideo,
    PodcastQa,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [
        ContentKind::SocialShort,
        ContentKind::LongFormVideo,
        ContentKind::PodcastQa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::SocialShort => "social_short",
            ContentKind::LongFormVideo => "long_form_video",
            ContentKind::PodcastQa => "podcast_qa",
        }
    }

    /// Human-facing name, used in listings and exported files.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::SocialShort => "Instagram Reel",
            ContentKind::LongFormVideo => "YouTube Video",
            ContentKind::PodcastQa => "Podcast Q&A",
        }
    }

    /// The fixed duration labels offered for this kind.
    pub fn duration_options(&self) -> &'static [&'static str] {
        match self {
            ContentKind::SocialShort => &["15 seconds", "30 seconds", "60 seconds"],
            ContentKind::LongFormVideo => {
                &["3-5 minutes", "5-10 minutes", "10-15 minutes", "15+ minutes"]
            }
            ContentKind::PodcastQa => {
                &["20-30 minutes", "30-45 minutes", "45-60 minutes", "60+ minutes"]
            }
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Legacy names from the first release are still accepted.
        match s.trim().to_ascii_lowercase().as_str() {
            "social_short" | "instagram" => Ok(ContentKind::SocialShort),
            "long_form_video" | "youtube" => Ok(ContentKind::LongFormVideo),
            "podcast_qa" | "podcast" => Ok(ContentKind::PodcastQa),
            _ => Err(RequestError::UnknownContentKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Casual,
    Professional,
    Humorous,
    Inspirational,
    Educational,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Casual,
        Tone::Professional,
        Tone::Humorous,
        Tone::Inspirational,
        Tone::Educational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Casual => "casual",
            Tone::Professional => "professional",
            Tone::Humorous => "humorous",
            Tone::Inspirational => "inspirational",
            Tone::Educational => "educational",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| RequestError::UnknownTone(s.to_string()))
    }
}
