pub const READER: &str = "Reader";
pub const WRITER: &str = "Writer";

/// Roles a caller may register with.
pub const KNOWN_ROLES: &[&str] = &[READER, WRITER];

/// Canonical spelling of `role`, matched ignoring ASCII case.
pub fn canonical_role(role: &str) -> Option<&'static str> {
    KNOWN_ROLES.iter().copied().find(|r| r.eq_ignore_ascii_case(role.trim()))
}

/// True when the caller holds at least one of `required`.
///
/// An empty requirement list grants nothing; public routes never reach this check.
pub fn authorize<S: AsRef<str>>(caller_roles: &[S], required: &[&str]) -> bool {
    required
        .iter()
        .any(|req| caller_roles.iter().any(|r| r.as_ref() == *req))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_required_role_is_enough() {
        assert!(authorize(&["Reader"], &[READER, WRITER]));
        assert!(authorize(&["Writer".to_string()], &[READER, WRITER]));
        assert!(authorize(&["Reader", "Writer"], &[WRITER]));
    }

    #[test]
    fn missing_roles_are_denied() {
        assert!(!authorize(&["Reader"], &[WRITER]));
        assert!(!authorize::<&str>(&[], &[READER]));
        assert!(!authorize(&["Writer"], &[]));
        assert!(!authorize(&["writer"], &[WRITER]));
    }

    #[test]
    fn canonicalizes_known_roles() {
        assert_eq!(canonical_role("writer"), Some(WRITER));
        assert_eq!(canonical_role(" Reader "), Some(READER));
        assert_eq!(canonical_role("Admin"), None);
    }
}
