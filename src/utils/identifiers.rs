//! Syntax checks for lookup identifiers.
//!
//! These predicates only look at the shape of the string. The lookup handlers
//! do not call them, apart from the email handler's format check which applies
//! [`EMAIL_PATTERN`].

use once_cell::sync::Lazy;
use regex::Regex;

// a single trailing newline is tolerated after the last token
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\n?$";
pub const DOMAIN_PATTERN: &str =
    r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}\n?$";
pub const USERNAME_PATTERN: &str = r"^[a-zA-Z0-9._-]+\n?$";
pub const USERNAME_MAX_LEN: usize = 50;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).unwrap());
static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(DOMAIN_PATTERN).unwrap());
static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(USERNAME_PATTERN).unwrap());

pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Accepts the legacy `inet_aton` numbers-and-dots notation only, so
/// `127.1` and `0x7f.0.0.1` pass while any IPv6 form is rejected.
pub fn validate_ip(ip: &str) -> bool {
    parse_inet_aton(ip).is_some()
}

pub fn validate_domain(domain: &str) -> bool {
    DOMAIN_REGEX.is_match(domain)
}

pub fn validate_username(username: &str) -> bool {
    let len = username.chars().count();
    if len < 1 || len > USERNAME_MAX_LEN {
        return false;
    }
    USERNAME_REGEX.is_match(username)
}

fn parse_inet_aton(input: &str) -> Option<u32> {
    let parts = input
        .split('.')
        .map(parse_inet_part)
        .collect::<Option<Vec<u64>>>()?;

    let (last, leading) = parts.split_last()?;
    if leading.len() > 3 || leading.iter().any(|part| *part > 0xff) {
        return None;
    }

    // the final part fills every byte the leading parts left over
    let tail_bits = 8 * (4 - leading.len() as u32);
    if *last >= 1u64 << tail_bits {
        return None;
    }

    let head = leading
        .iter()
        .fold(0u64, |acc, part| (acc << 8) | part);
    Some(((head << tail_bits) | last) as u32)
}

fn parse_inet_part(part: &str) -> Option<u64> {
    if part.is_empty() {
        return None;
    }
    let (digits, radix) = if let Some(hex) = part
        .strip_prefix("0x")
        .or_else(|| part.strip_prefix("0X"))
    {
        (hex, 16)
    } else if part.len() > 1 && part.starts_with('0') {
        (&part[1..], 8)
    } else {
        (part, 10)
    };

    if digits.is_empty() {
        // a bare "0x" is zero for inet_aton
        return (radix == 16).then_some(0);
    }
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix)
        .ok()
        .filter(|value| *value <= u64::from(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("first.last+tag@mail.example.org"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("user@host"));
        assert!(!validate_email("user@host.c"));
    }

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("example.com"));
        assert!(validate_domain("sub-1.example.co.uk"));
        assert!(!validate_domain("bad_domain!"));
        assert!(!validate_domain("-leading.com"));
        assert!(!validate_domain("localhost"));
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("valid.user-1"));
        assert!(validate_username(&"a".repeat(50)));
        assert!(!validate_username(&"a".repeat(51)));
        assert!(!validate_username(""));
        assert!(!validate_username("has space"));
    }

    #[test]
    fn test_single_trailing_newline_is_accepted() {
        assert!(validate_email("a@b.co\n"));
        assert!(validate_domain("example.com\n"));
        assert!(validate_username("octocat\n"));
        assert!(!validate_email("a@b.co\n\n"));
        assert!(!validate_username("octo\ncat"));
        assert!(!validate_username(&format!("{}\n", "a".repeat(50))));
    }

    #[test]
    fn test_validate_ip_dotted_quad() {
        assert!(validate_ip("192.168.1.1"));
        assert!(validate_ip("0.0.0.0"));
        assert!(validate_ip("255.255.255.255"));
        assert!(!validate_ip("256.1.1.1"));
        assert!(!validate_ip("1.2.3.4.5"));
        assert!(!validate_ip(""));
        assert!(!validate_ip("1..2.3"));
    }

    #[test]
    fn test_validate_ip_legacy_forms() {
        assert!(validate_ip("127.1"));
        assert!(validate_ip("0x7f.0.0.1"));
        assert!(validate_ip("0177.0.0.1"));
        assert!(validate_ip("3232235777"));
        assert!(!validate_ip("08.0.0.1"));
        assert!(!validate_ip("1.2.65536"));
    }

    #[test]
    fn test_validate_ip_rejects_ipv6() {
        assert!(!validate_ip("::1"));
        assert!(!validate_ip("2001:db8::1"));
    }

    #[test]
    fn test_parse_inet_aton_value() {
        assert_eq!(parse_inet_aton("127.1"), Some(0x7f00_0001));
        assert_eq!(parse_inet_aton("10.1.258"), Some(0x0a01_0102));
    }
}
