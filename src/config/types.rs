use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub youtube: YouTubeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    /// API key; falls back to the VIDFORGE_OPENAI_KEY environment variable
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Chat model used for both drafting and enhancement
    #[serde(default = "default_model")]
    pub model: String,

    /// Voice preset for speech synthesis
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Requested image dimensions, e.g. "1024x1024"
    #[serde(default = "default_image_size")]
    pub image_size: String,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_voice() -> String {
    "alloy".to_string()
}
fn default_image_size() -> String {
    "1024x1024".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_model(),
            voice: default_voice(),
            image_size: default_image_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YouTubeConfig {
    /// OAuth access token; falls back to the VIDFORGE_YT_TOKEN environment
    /// variable. Token acquisition is out of scope.
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// Privacy level applied to published videos. Never defaults to public.
    #[serde(default)]
    pub default_visibility: Visibility,
}

fn default_upload_url() -> String {
    "https://www.googleapis.com/upload/youtube/v3/videos".to_string()
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            upload_url: default_upload_url(),
            default_visibility: Visibility::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Unlisted,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::Private => "private",
        }
    }
}
