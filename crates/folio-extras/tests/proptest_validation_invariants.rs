//! Property-based invariant tests for the contact form rules.
//!
//! 1. Well-formed `local@domain.tld` addresses always pass.
//! 2. Addresses without exactly one `@`, or with whitespace, never pass.
//! 3. Name and message acceptance depends only on UTF-16 length.
//! 4. `validate_form` only ever reports name, email, and message.
//! 5. Typing into a field always clears that field's error.

use folio_extras::contact::{ContactForm, ContactFormData};
use folio_extras::validation::{Email, FormField, validate_email, validate_form, validate_message, validate_name};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn atom() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._%+-]{1,12}"
}

fn field_strategy() -> impl Strategy<Value = FormField> {
    prop::sample::select(FormField::ALL.to_vec())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Well-formed addresses pass
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn well_formed_addresses_pass(local in atom(), host in atom(), tld in atom()) {
        let email = format!("{}@{}.{}", local, host, tld);
        prop_assert!(Email::matches(&email), "email={}", email);
        prop_assert_eq!(validate_email(&email), None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Malformed addresses fail
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn no_at_sign_fails(s in "[a-z.]{1,20}") {
        prop_assert!(!Email::matches(&s));
    }

    #[test]
    fn two_at_signs_fail(a in atom(), b in atom(), c in atom()) {
        let email = format!("{}@{}@{}.com", a, b, c);
        prop_assert!(!Email::matches(&email), "email={}", email);
    }

    #[test]
    fn whitespace_fails(local in atom(), host in atom(), ws in "[ \t\n]") {
        let email = format!("{}{}@{}.com", local, ws, host);
        prop_assert!(!Email::matches(&email), "email={:?}", email);
    }

    #[test]
    fn domain_without_inner_dot_fails(local in atom(), host in "[a-z]{1,10}") {
        let bare = format!("{}@{}", local, host);
        let trailing = format!("{}@{}.", local, host);
        let leading = format!("{}@.{}", local, host);
        prop_assert!(!Email::matches(&bare), "email={}", bare);
        prop_assert!(!Email::matches(&trailing), "email={}", trailing);
        prop_assert!(!Email::matches(&leading), "email={}", leading);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Length rules count UTF-16 code units
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn name_threshold(s in "\\PC{0,8}") {
        let n = s.encode_utf16().count();
        let result = validate_name(&s);
        match n {
            0 => prop_assert_eq!(result.as_deref(), Some("Name is required")),
            1 => prop_assert_eq!(result.as_deref(), Some("Name must be at least 2 characters")),
            _ => prop_assert_eq!(result, None),
        }
    }

    #[test]
    fn message_threshold(s in "\\PC{0,20}") {
        let n = s.encode_utf16().count();
        let result = validate_message(&s);
        if n == 0 {
            prop_assert_eq!(result.as_deref(), Some("Message is required"));
        } else if n < 10 {
            prop_assert_eq!(result.as_deref(), Some("Message must be at least 10 characters"));
        } else {
            prop_assert_eq!(result, None);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Subject is never reported
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn errors_only_for_required_fields(
        name in "\\PC{0,4}",
        email in "\\PC{0,8}",
        subject in "\\PC{0,200}",
        message in "\\PC{0,12}",
    ) {
        let errors = validate_form(&ContactFormData { name, email, subject, message });
        prop_assert!(errors.len() <= 3);
        prop_assert_eq!(errors.get(FormField::Subject), None);
        prop_assert_eq!(errors.submit(), None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Input clears that field's error
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn input_clears_its_error(field in field_strategy(), value in "\\PC{0,12}") {
        let mut form = ContactForm::new();
        for f in FormField::ALL {
            form.on_blur(f);
        }
        let before = form.errors().len();
        let had_error = form.errors().get(field).is_some();

        form.on_input(field, value);

        prop_assert_eq!(form.errors().get(field), None);
        prop_assert_eq!(form.errors().len(), before - usize::from(had_error));
    }
}
