use std::env;

pub const HIBP_API_KEY: &str = "HIBP_API_KEY";
pub const IPINFO_API_KEY: &str = "IPINFO_API_KEY";
pub const SHODAN_API_KEY: &str = "SHODAN_API_KEY";

/// Provider API keys, read once at start-up.
///
/// A missing or empty key switches the matching service to its mock payload.
#[derive(Clone, Default)]
pub struct Credentials {
    pub hibp_api_key: Option<String>,
    pub ipinfo_api_key: Option<String>,
    pub shodan_api_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            hibp_api_key: read_key(HIBP_API_KEY),
            ipinfo_api_key: read_key(IPINFO_API_KEY),
            shodan_api_key: read_key(SHODAN_API_KEY),
        }
    }

    pub fn configured(&self) -> Vec<&'static str> {
        [
            (HIBP_API_KEY, &self.hibp_api_key),
            (IPINFO_API_KEY, &self.ipinfo_api_key),
            (SHODAN_API_KEY, &self.shodan_api_key),
        ]
        .into_iter()
        .filter(|(_, key)| key.is_some())
        .map(|(name, _)| name)
        .collect()
    }
}

// keys stay out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("hibp_api_key", &self.hibp_api_key.as_ref().map(|_| "***"))
            .field("ipinfo_api_key", &self.ipinfo_api_key.as_ref().map(|_| "***"))
            .field("shodan_api_key", &self.shodan_api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

fn read_key(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_lists_present_keys() {
        let credentials = Credentials {
            hibp_api_key: Some("k".to_string()),
            ipinfo_api_key: None,
            shodan_api_key: Some("s".to_string()),
        };

        assert_eq!(credentials.configured(), vec![HIBP_API_KEY, SHODAN_API_KEY]);
        assert!(Credentials::default().configured().is_empty());
    }

    #[test]
    fn test_debug_masks_keys() {
        let credentials = Credentials {
            hibp_api_key: Some("super-secret".to_string()),
            ..Credentials::default()
        };

        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }
}
