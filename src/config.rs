//! Resolver configuration
//!
//! Provider selection and credentials, read once from the environment at
//! startup and handed to the resolver explicitly.

use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const OPENFOODFACTS_ENDPOINT: &str = "https://world.openfoodfacts.org";
pub const EDAMAM_ENDPOINT: &str = "https://api.edamam.com/api/nutrition-data";
pub const NUTRITIONIX_ENDPOINT: &str = "https://trackapi.nutritionix.com/v2/natural/nutrients";

/// Remote nutrition provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Free-text product search, no credentials
    OpenFoodFacts,
    /// Ingredient-string analysis, app id + key
    Edamam,
    /// Natural-language nutrients, app id + key
    Nutritionix,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenFoodFacts => "openfoodfacts",
            ProviderKind::Edamam => "edamam",
            ProviderKind::Nutritionix => "nutritionix",
        }
    }

    /// Parse a provider name; "none" and unknown names disable the remote tier
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "openfoodfacts" | "off" => Some(ProviderKind::OpenFoodFacts),
            "edamam" => Some(ProviderKind::Edamam),
            "nutritionix" => Some(ProviderKind::Nutritionix),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// App id / key pair for keyed providers
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub app_id: String,
    pub app_key: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.app_id.trim().is_empty() && !self.app_key.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub openfoodfacts: String,
    pub edamam: String,
    pub nutritionix: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            openfoodfacts: OPENFOODFACTS_ENDPOINT.to_string(),
            edamam: EDAMAM_ENDPOINT.to_string(),
            nutritionix: NUTRITIONIX_ENDPOINT.to_string(),
        }
    }
}

/// Everything the resolver needs to pick and call a remote provider
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Active provider, None disables the remote tier
    pub provider: Option<ProviderKind>,
    pub edamam: Credentials,
    pub nutritionix: Credentials,
    pub endpoints: Endpoints,
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            provider: Some(ProviderKind::Edamam),
            edamam: Credentials::default(),
            nutritionix: Credentials::default(),
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ResolverConfig {
    /// Local-only configuration: the remote tier is never attempted
    pub fn offline() -> Self {
        Self {
            provider: None,
            ..Self::default()
        }
    }

    /// Read configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).unwrap_or_default();

        let provider = match lookup("MACROTRACK_NUTRITION_PROVIDER") {
            Some(name) => {
                let parsed = ProviderKind::from_str(&name);
                if parsed.is_none() && !name.trim().eq_ignore_ascii_case("none") {
                    tracing::warn!("Unknown nutrition provider '{}', remote lookups disabled", name);
                }
                parsed
            }
            None => defaults.provider,
        };

        let timeout = lookup("MACROTRACK_HTTP_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let endpoints = Endpoints {
            openfoodfacts: lookup("MACROTRACK_OPENFOODFACTS_ENDPOINT")
                .unwrap_or(defaults.endpoints.openfoodfacts),
            edamam: lookup("MACROTRACK_EDAMAM_ENDPOINT").unwrap_or(defaults.endpoints.edamam),
            nutritionix: lookup("MACROTRACK_NUTRITIONIX_ENDPOINT")
                .unwrap_or(defaults.endpoints.nutritionix),
        };

        Self {
            provider,
            edamam: Credentials::new(var("EDAMAM_APP_ID"), var("EDAMAM_APP_KEY")),
            nutritionix: Credentials::new(var("NUTRITIONIX_APP_ID"), var("NUTRITIONIX_APP_KEY")),
            endpoints,
            timeout,
        }
    }

    /// True when the active provider can be called (credentials present if keyed)
    pub fn is_remote_configured(&self) -> bool {
        match self.provider {
            Some(ProviderKind::OpenFoodFacts) => true,
            Some(ProviderKind::Edamam) => self.edamam.is_complete(),
            Some(ProviderKind::Nutritionix) => self.nutritionix.is_complete(),
            None => false,
        }
    }
}
