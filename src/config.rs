//! Service endpoint and credentials, passed in explicitly at construction.

/// Where the test service lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    base_url: String,
    token: String,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            token: token.into(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joining() {
        let config = ServiceConfig::new("https://api.example.com/v1/", "tok");
        assert_eq!(
            config.endpoint("tests/t1"),
            "https://api.example.com/v1/tests/t1"
        );
        assert_eq!(
            config.endpoint("/tests/t1"),
            "https://api.example.com/v1/tests/t1"
        );
    }
}
