use std::fmt;

/// Chat participant who issued a command or pressed a button
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            first_name: None,
        }
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    pub fn with_first_name(mut self, first: Option<String>) -> Self {
        self.first_name = first;
        self
    }

    pub fn display_name(&self) -> String {
        match (&self.username, &self.first_name) {
            (Some(username), _) => format!("@{}", username),
            (None, Some(first)) => first.clone(),
            (None, None) => self.id.clone(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_preference() {
        let user = User::new("42");
        assert_eq!(user.display_name(), "42");

        let user = user.with_first_name(Some("Аня".to_string()));
        assert_eq!(user.display_name(), "Аня");

        let user = user.with_username(Some("anya".to_string()));
        assert_eq!(user.to_string(), "@anya");
    }
}
