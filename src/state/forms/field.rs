//! Form field identifiers and value objects

use std::fmt;

/// The fields of a collaborator draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Email,
    Active,
    Department,
}

impl Field {
    /// Every field, in display order
    pub const ALL: [Field; 4] = [Field::Title, Field::Email, Field::Active, Field::Department];

    /// Key used in error maps and on the wire
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Email => "email",
            Field::Active => "active",
            Field::Department => "department",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Email => "E-mail",
            Field::Active => "Activate on create",
            Field::Department => "Department",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Title => "Type the title here",
            Field::Email => "name@company.com",
            Field::Active => "",
            Field::Department => "Select a department",
        }
    }

    /// Whether the field holds a boolean rather than text
    pub fn is_toggle(self) -> bool {
        matches!(self, Field::Active)
    }

    /// Whether the field's value is picked from a fixed option list
    pub fn is_choice(self) -> bool {
        matches!(self, Field::Department)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Toggle(bool),
}

impl FieldValue {
    /// Short name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Toggle(_) => "boolean",
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Toggle(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_wire_name() {
        assert_eq!(Field::Department.to_string(), "department");
        assert_eq!(Field::Email.to_string(), "email");
    }

    #[test]
    fn test_only_active_is_toggle() {
        let toggles: Vec<Field> = Field::ALL.into_iter().filter(|f| f.is_toggle()).collect();
        assert_eq!(toggles, vec![Field::Active]);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldValue::from("Ana").kind(), "text");
        assert_eq!(FieldValue::Toggle(false).kind(), "boolean");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(FieldValue::from(true), FieldValue::Toggle(true));
        assert_eq!(FieldValue::from("x"), FieldValue::Text("x".to_string()));
    }
}
