use crate::providers::ProviderError;

/// Renders a provider duration (`H:MM` or `HH:MM:SS`) as e.g. `1 hour, 5 minutes`.
/// Zero components are omitted; seconds are ignored.
pub fn format_eta(formatted: &str) -> Result<String, ProviderError> {
    let mut parts = formatted.split(':').map(|part| part.trim().parse::<u32>());
    let (hours, minutes) = match (parts.next(), parts.next()) {
        (Some(Ok(hours)), Some(Ok(minutes))) => (hours, minutes),
        _ => {
            return Err(ProviderError::Parse(format!(
                "unrecognised route duration '{formatted}'"
            )))
        }
    };

    let mut eta = Vec::with_capacity(2);
    if hours > 0 {
        eta.push(count_of(hours, "hour"));
    }
    if minutes > 0 {
        eta.push(count_of(minutes, "minute"));
    }
    Ok(eta.join(", "))
}

fn count_of(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
