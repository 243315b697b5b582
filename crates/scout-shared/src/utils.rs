//! Utility functions

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let keep = local.chars().take(if local.chars().count() <= 2 { 1 } else { 2 });
        format!("{}***{}", keep.collect::<String>(), domain)
    } else {
        "***".to_string()
    }
}

/// Normalize an email for lookups and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
