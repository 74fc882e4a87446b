//! Field kinds for flat editable surfaces.
//!
//! Identifies what kind of form field a flat buffer belongs to, which decides
//! whether case conversion may touch it at all.

use std::fmt;

/// The kind of a flat editable field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Plain single-line text input (also the default for a missing type)
    Text,
    Search,
    Url,
    Tel,
    Password,
    Email,
    /// Multi-line text area
    TextArea,
    /// Any other input type (number, date, checkbox, ...), never converted
    Other(String),
}

impl FieldKind {
    /// Parse an input `type` attribute. A missing type means `text`; matching
    /// is case-insensitive.
    pub fn from_input_type(ty: Option<&str>) -> Self {
        let ty = ty.unwrap_or("text").trim().to_ascii_lowercase();
        match ty.as_str() {
            "" | "text" => FieldKind::Text,
            "search" => FieldKind::Search,
            "url" => FieldKind::Url,
            "tel" => FieldKind::Tel,
            "password" => FieldKind::Password,
            "email" => FieldKind::Email,
            _ => FieldKind::Other(ty),
        }
    }

    /// Check if this field holds free text that case conversion may rewrite
    pub fn is_text_like(&self) -> bool {
        !matches!(self, FieldKind::Other(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Search => write!(f, "search"),
            FieldKind::Url => write!(f, "url"),
            FieldKind::Tel => write!(f, "tel"),
            FieldKind::Password => write!(f, "password"),
            FieldKind::Email => write!(f, "email"),
            FieldKind::TextArea => write!(f, "textarea"),
            FieldKind::Other(ty) => write!(f, "{}", ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_type_is_text() {
        assert_eq!(FieldKind::from_input_type(None), FieldKind::Text);
    }

    #[test]
    fn test_type_is_case_insensitive() {
        assert_eq!(FieldKind::from_input_type(Some("EMAIL")), FieldKind::Email);
        assert_eq!(FieldKind::from_input_type(Some(" Tel ")), FieldKind::Tel);
    }

    #[test]
    fn test_text_like_kinds() {
        for ty in ["text", "search", "url", "tel", "password", "email"] {
            assert!(FieldKind::from_input_type(Some(ty)).is_text_like(), "{}", ty);
        }
        assert!(FieldKind::TextArea.is_text_like());
    }

    #[test]
    fn test_other_kinds_are_not_text_like() {
        let kind = FieldKind::from_input_type(Some("Number"));
        assert_eq!(kind, FieldKind::Other("number".to_string()));
        assert!(!kind.is_text_like());
        assert_eq!(kind.to_string(), "number");
    }
}
