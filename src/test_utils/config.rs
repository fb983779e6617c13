//! Configuration utilities for testing.
//!
//! This module provides test configuration builders and helpers for creating
//! mock configurations used throughout the test suite.

use crate::config::{InfluxConfig, ModemConfig};

/// Builder for creating test modem configurations.
#[derive(Debug)]
pub struct TestModemConfigBuilder {
    url: String,
    user: String,
    password: String,
    timeout_seconds: u64,
    insecure_skip_verify: bool,
    device_info: bool,
}

impl TestModemConfigBuilder {
    /// Creates a new test config builder with default values.
    pub fn new() -> Self {
        Self {
            url: "http://modem.test/HNAP1/".to_string(),
            user: "admin".to_string(),
            password: "motorola".to_string(),
            timeout_seconds: 5,
            insecure_skip_verify: false,
            device_info: true,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_insecure_skip_verify(mut self, insecure_skip_verify: bool) -> Self {
        self.insecure_skip_verify = insecure_skip_verify;
        self
    }

    pub fn with_device_info(mut self, device_info: bool) -> Self {
        self.device_info = device_info;
        self
    }

    /// Builds the modem configuration.
    pub fn build(self) -> ModemConfig {
        ModemConfig {
            url: self.url,
            user: self.user,
            password: self.password,
            timeout_seconds: self.timeout_seconds,
            insecure_skip_verify: self.insecure_skip_verify,
            device_info: self.device_info,
        }
    }
}

/// Builder for creating test InfluxDB configurations.
#[derive(Debug)]
pub struct TestInfluxConfigBuilder {
    url: String,
    org: String,
    token: String,
    bucket: String,
}

impl TestInfluxConfigBuilder {
    /// Creates a new test config builder with default values.
    pub fn new() -> Self {
        Self {
            url: "http://localhost:8086".to_string(),
            org: "test-org".to_string(),
            token: "test-token".to_string(),
            bucket: "test-bucket".to_string(),
        }
    }

    /// Sets the URL for the test configuration.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the bucket for the test configuration.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Builds the InfluxDB configuration.
    pub fn build(self) -> InfluxConfig {
        InfluxConfig {
            url: self.url,
            org: self.org,
            token: self.token,
            bucket: self.bucket,
        }
    }
}

/// Creates a default test InfluxDB configuration.
pub fn test_influx_config() -> InfluxConfig {
    TestInfluxConfigBuilder::new().build()
}

/// Creates a test InfluxDB configuration pointing at a mock server.
pub fn test_influx_config_with_url(url: impl Into<String>) -> InfluxConfig {
    TestInfluxConfigBuilder::new().with_url(url).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modem_config_builder() {
        let config = TestModemConfigBuilder::new()
            .with_url("https://10.0.0.1/HNAP1/")
            .with_user("root")
            .with_password("secret")
            .with_timeout_seconds(1)
            .with_insecure_skip_verify(true)
            .with_device_info(false)
            .build();

        assert_eq!(config.url, "https://10.0.0.1/HNAP1/");
        assert_eq!(config.user, "root");
        assert_eq!(config.password, "secret");
        assert_eq!(config.timeout_seconds, 1);
        assert!(config.insecure_skip_verify);
        assert!(!config.device_info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_influx_config_builder() {
        let config = TestInfluxConfigBuilder::new()
            .with_url("http://influx.local")
            .with_bucket("my-bucket")
            .build();

        assert_eq!(config.url, "http://influx.local");
        assert_eq!(config.org, "test-org");
        assert_eq!(config.bucket, "my-bucket");
        assert_eq!(test_influx_config_with_url("http://mock:8086").url, "http://mock:8086");
    }
}
