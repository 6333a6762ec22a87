//! Account generation: contact channels, phone numbers and emails.

use rand::Rng;
use rand::seq::SliceRandom;

use academy::models::{NewAccount, Role};

use crate::catalog::PersonName;

/// Mobile operator prefixes used for generated phone numbers.
pub const OPERATOR_CODES: &[&str] = &["937", "999", "901", "902", "905"];

pub const EMAIL_DOMAIN: &str = "academy.com";

/// Fixed credentials of the bootstrap administrator.
pub const ADMIN_EMAIL: &str = "admin@academy.com";
pub const ADMIN_PHONE: &str = "+7 (999) 111-22-33";
pub const ADMIN_NAME: PersonName = PersonName::new("Админ", "Админов");

/// Which contact channels an account is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactChannels {
    EmailOnly,
    PhoneOnly,
    Both,
}

impl ContactChannels {
    /// Two coin flips: the first decides whether there is an email; with an email the
    /// second decides whether a phone is added too, without one a phone is always added.
    /// Yields email-only 1/4, both 1/4, phone-only 1/2.
    pub fn pick(rng: &mut impl Rng) -> Self {
        let has_email = rng.gen_bool(0.5);
        let second = rng.gen_bool(0.5);
        match (has_email, second) {
            (true, true) => ContactChannels::EmailOnly,
            (true, false) => ContactChannels::Both,
            (false, _) => ContactChannels::PhoneOnly,
        }
    }

    pub fn has_email(&self) -> bool {
        matches!(self, ContactChannels::EmailOnly | ContactChannels::Both)
    }

    pub fn has_phone(&self) -> bool {
        matches!(self, ContactChannels::PhoneOnly | ContactChannels::Both)
    }
}

/// Generates a number formatted as `+7 (XXX) XXX-XX-XX`.
pub fn generate_phone(rng: &mut impl Rng) -> String {
    let operator = OPERATOR_CODES.choose(rng).copied().unwrap_or("999");
    let digits: String = (0..7)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();

    format!(
        "+7 ({operator}) {}-{}-{}",
        &digits[..3],
        &digits[3..5],
        &digits[5..]
    )
}

/// Email for the `number`-th (1-based) account of a role, e.g. `mentor3@academy.com`.
pub fn seeded_email(role: Role, number: usize) -> String {
    format!("{}{number}@{EMAIL_DOMAIN}", role.as_str())
}

/// Account draft before uniqueness checks.
pub fn account_draft(
    name: PersonName,
    role: Role,
    email: Option<String>,
    phone: Option<String>,
    password_hash: &str,
) -> NewAccount {
    NewAccount {
        email,
        phone,
        first_name: name.first.to_string(),
        last_name: name.last.to_string(),
        password_hash: password_hash.to_string(),
        role,
        is_superuser: role == Role::Admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_phone_format() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let phone = generate_phone(&mut rng);
            assert_eq!(phone.len(), "+7 (999) 123-45-67".len());
            assert!(phone.starts_with("+7 ("));

            let operator = &phone[4..7];
            assert!(OPERATOR_CODES.contains(&operator), "bad operator {operator}");
            assert_eq!(&phone[7..9], ") ");
            assert_eq!(&phone[12..13], "-");
            assert_eq!(&phone[15..16], "-");

            let digits: String = phone[9..].chars().filter(|c| c.is_ascii_digit()).collect();
            assert_eq!(digits.len(), 7);
        }
    }

    #[test]
    fn test_contact_channels_always_reachable() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen = std::collections::HashMap::new();
        for _ in 0..4000 {
            let channels = ContactChannels::pick(&mut rng);
            assert!(channels.has_email() || channels.has_phone());
            *seen.entry(channels).or_insert(0usize) += 1;
        }

        let phone_only = seen[&ContactChannels::PhoneOnly] as f64 / 4000.0;
        let email_only = seen[&ContactChannels::EmailOnly] as f64 / 4000.0;
        let both = seen[&ContactChannels::Both] as f64 / 4000.0;
        assert!((phone_only - 0.5).abs() < 0.05, "phone-only {phone_only}");
        assert!((email_only - 0.25).abs() < 0.05, "email-only {email_only}");
        assert!((both - 0.25).abs() < 0.05, "both {both}");
    }

    #[test]
    fn test_seeded_email() {
        assert_eq!(seeded_email(Role::Mentor, 1), "mentor1@academy.com");
        assert_eq!(seeded_email(Role::Student, 10), "student10@academy.com");
    }

    #[test]
    fn test_admin_draft_is_superuser() {
        let draft = account_draft(
            ADMIN_NAME,
            Role::Admin,
            Some(ADMIN_EMAIL.to_string()),
            Some(ADMIN_PHONE.to_string()),
            "hash",
        );
        assert!(draft.is_superuser);

        let draft = account_draft(ADMIN_NAME, Role::Student, None, Some("p".into()), "hash");
        assert!(!draft.is_superuser);
    }
}
