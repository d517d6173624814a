use crate::config::ConfigError;

pub type EnvLookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

pub(crate) fn optional_trimmed(lookup: &EnvLookup<'_>, key: &str) -> Option<String> {
    lookup(key).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub(crate) fn parse_base_url(
    lookup: &EnvLookup<'_>,
    key: &str,
) -> Result<Option<String>, ConfigError> {
    let Some(raw) = optional_trimmed(lookup, key) else {
        return Ok(None);
    };

    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        return Err(ConfigError::InvalidConfiguration(format!(
            "{key} must start with http:// or https://"
        )));
    }

    if url::Url::parse(&raw).is_err() {
        return Err(ConfigError::InvalidConfiguration(format!(
            "{key} is not a valid URL"
        )));
    }

    Ok(Some(raw.trim_end_matches('/').to_string()))
}
