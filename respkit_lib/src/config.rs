//! Service settings read from the environment.

/// Limits applied by [`CompanyService`](crate::CompanyService).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Largest page size a list request may ask for.
    pub max_page_size: i64,
    /// Page size front ends use when a caller pages without giving one.
    pub default_page_size: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_page_size: 100,
            default_page_size: 20,
        }
    }
}

impl ServiceConfig {
    /// Reads `RESPKIT_MAX_PAGE_SIZE` and `RESPKIT_DEFAULT_PAGE_SIZE`, falling
    /// back to the defaults. The default page size never exceeds the maximum.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let max_page_size = env_i64("RESPKIT_MAX_PAGE_SIZE", defaults.max_page_size);
        let default_page_size =
            env_i64("RESPKIT_DEFAULT_PAGE_SIZE", defaults.default_page_size).min(max_page_size);
        Self {
            max_page_size,
            default_page_size,
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<i64>().ok())
        .filter(|val| *val > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_values_fall_back() {
        std::env::set_var("RESPKIT_TEST_PAGE_SIZE_BAD", "lots");
        assert_eq!(env_i64("RESPKIT_TEST_PAGE_SIZE_BAD", 7), 7);
        std::env::set_var("RESPKIT_TEST_PAGE_SIZE_NEG", "-3");
        assert_eq!(env_i64("RESPKIT_TEST_PAGE_SIZE_NEG", 7), 7);
        std::env::set_var("RESPKIT_TEST_PAGE_SIZE_OK", "25");
        assert_eq!(env_i64("RESPKIT_TEST_PAGE_SIZE_OK", 7), 25);
    }

    #[test]
    fn missing_value_uses_default() {
        assert_eq!(env_i64("RESPKIT_TEST_PAGE_SIZE_UNSET", 100), 100);
    }
}
