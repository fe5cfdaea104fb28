use anyhow::Result;
use regex::Regex;
use std::env;
use tracing::{debug, warn};

const ENV_VAR_PATTERN: &str = r"\$\{(\w+)\}|\$(\w+)";

/// Substitute environment variables in the format ${VAR_NAME} or $VAR_NAME
///
/// Unset variables keep their placeholder, which then fails YAML typing or
/// validation further down.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(ENV_VAR_PATTERN)?;
    let mut result = content.to_string();
    let mut missing_vars = Vec::new();

    for caps in re.captures_iter(content) {
        let (Some(placeholder), Some(var)) = (caps.get(0), caps.get(1).or(caps.get(2))) else {
            continue;
        };
        let var_name = var.as_str();

        match env::var(var_name) {
            Ok(value) => {
                debug!("Substituting environment variable: {} = \"{}\"", var_name, value);
                result = result.replace(placeholder.as_str(), &value);
            }
            Err(_) => {
                warn!("Environment variable '{}' not set", var_name);
                missing_vars.push(var_name.to_string());
            }
        }
    }

    if !missing_vars.is_empty() {
        debug!(
            "Environment variables not set (may use defaults or fail validation): {:?}",
            missing_vars
        );
    }

    Ok(result)
}

/// Check if a string contains unresolved environment variable placeholders
pub fn has_unresolved_env_vars(content: &str) -> bool {
    Regex::new(ENV_VAR_PATTERN)
        .map(|re| re.is_match(content))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_both_forms() {
        env::set_var("DECAYVIZ_TEST_HOST", "10.0.0.5");
        env::set_var("DECAYVIZ_TEST_PORT", "8200");
        let out = substitute_env_vars("host: ${DECAYVIZ_TEST_HOST}\nport: $DECAYVIZ_TEST_PORT\n")
            .unwrap();
        assert_eq!(out, "host: 10.0.0.5\nport: 8200\n");
        assert!(!has_unresolved_env_vars(&out));
    }

    #[test]
    fn test_missing_variable_keeps_placeholder() {
        env::remove_var("DECAYVIZ_TEST_UNSET");
        let out = substitute_env_vars("prefix: ${DECAYVIZ_TEST_UNSET}").unwrap();
        assert_eq!(out, "prefix: ${DECAYVIZ_TEST_UNSET}");
        assert!(has_unresolved_env_vars(&out));
    }
}
