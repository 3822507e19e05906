use crate::types::User;
use std::collections::HashMap;

pub const EMAIL_HEADER: &str = "Email";

/// Upper-case the first letter of every word in `name`.
///
/// A word starts after any ASCII character that is neither alphanumeric nor
/// `_`, or after Unicode whitespace. Everything else is left untouched, so
/// `"linkedIn"` stays `"LinkedIn"` and `"google plus"` becomes `"Google Plus"`.
/// The length in chars never changes: a letter with no single-char title
/// form (`ß`) is kept as-is.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev = ' ';
    for c in name.chars() {
        if is_separator(prev) {
            out.push(to_title(c));
        } else {
            out.push(c);
        }
        prev = c;
    }
    out
}

fn to_title(c: char) -> char {
    // Latin digraphs whose titlecase differs from their uppercase.
    match c {
        '\u{01C4}'..='\u{01C6}' => return '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => return '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => return '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => return '\u{01F2}',
        _ => {}
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}

/// Column index for the export: `Email` first, then one column per distinct
/// (title-cased) social network in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkColumns {
    networks: Vec<String>,
    index: HashMap<String, usize>,
}

impl NetworkColumns {
    pub fn from_users(users: &[User]) -> Self {
        let mut columns = Self::default();
        for user in users {
            for profile in user.profiles() {
                columns.insert(&profile.name);
            }
        }
        columns
    }

    /// Add a network if it is not already present. Returns its column.
    pub fn insert(&mut self, name: &str) -> Option<usize> {
        let key = normalize(name)?;
        if let Some(&col) = self.index.get(&key) {
            return Some(col);
        }
        self.networks.push(key.clone());
        let col = self.networks.len();
        self.index.insert(key, col);
        Some(col)
    }

    /// Zero-based spreadsheet column of `name`; column 0 is the email.
    pub fn column_of(&self, name: &str) -> Option<usize> {
        self.index.get(&normalize(name)?).copied()
    }

    pub fn header(&self) -> Vec<String> {
        std::iter::once(EMAIL_HEADER.to_string())
            .chain(self.networks.iter().cloned())
            .collect()
    }

    pub fn networks(&self) -> &[String] {
        &self.networks
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

fn normalize(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(title_case(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SocialProfile, SocialProfiles};

    fn user(email: &str, networks: &[&str]) -> User {
        User {
            email: Some(email.to_string()),
            social_profiles: SocialProfiles {
                social_profiles: networks
                    .iter()
                    .map(|n| SocialProfile {
                        name: n.to_string(),
                        url: format!("https://{n}.example/{email}"),
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("twitter"), "Twitter");
        assert_eq!(title_case("google plus"), "Google Plus");
        assert_eq!(title_case("linkedIn"), "LinkedIn");
        assert_eq!(title_case("about.me"), "About.Me");
        assert_eq!(title_case("snake_case"), "Snake_case");
        assert_eq!(title_case("élan"), "Élan");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_keeps_char_count() {
        assert_eq!(title_case("ßtwitter"), "ßtwitter");
        assert_eq!(title_case("ǆx"), "ǅx");
        assert_eq!(title_case("ǉubljana"), "ǈubljana");
        assert_eq!(title_case("ﬁddle"), "ﬁddle");
    }

    #[test]
    fn columns_in_first_seen_order() {
        let users = vec![
            user("a@example.com", &["twitter", "github"]),
            user("b@example.com", &["linkedin", "twitter"]),
        ];
        let columns = NetworkColumns::from_users(&users);
        assert_eq!(columns.networks(), ["Twitter", "Github", "Linkedin"]);
        assert_eq!(
            columns.header(),
            ["Email", "Twitter", "Github", "Linkedin"]
        );
        assert_eq!(columns.column_of("github"), Some(2));
        assert_eq!(columns.column_of("facebook"), None);
    }

    #[test]
    fn case_variants_share_a_column() {
        let users = vec![
            user("a@example.com", &["twitter"]),
            user("b@example.com", &["Twitter"]),
        ];
        let columns = NetworkColumns::from_users(&users);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns.column_of("twitter"), columns.column_of("Twitter"));
    }

    #[test]
    fn blank_names_are_skipped() {
        let users = vec![user("a@example.com", &["", "  ", "github"])];
        let columns = NetworkColumns::from_users(&users);
        assert_eq!(columns.networks(), ["Github"]);
        assert_eq!(columns.column_of(" "), None);
    }

    #[test]
    fn network_named_email_gets_its_own_column() {
        let users = vec![user("a@example.com", &["email"])];
        let columns = NetworkColumns::from_users(&users);
        assert_eq!(columns.header(), ["Email", "Email"]);
        assert_eq!(columns.column_of("email"), Some(1));
    }

    #[test]
    fn no_users_no_networks() {
        let columns = NetworkColumns::from_users(&[]);
        assert!(columns.is_empty());
        assert_eq!(columns.header(), ["Email"]);
    }
}
