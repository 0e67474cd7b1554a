//! # Diagnostics
//!
//! The composer never fails on missing optional data; it skips the element
//! and reports a [`Notice`] to an injected [`Observer`]. The binary uses
//! [`LogObserver`]; tests collect notices into a `Vec<Notice>`.

use std::fmt;

use crate::layout::Section;

/// A contact line in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Address,
    Email,
    Phone,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContactField::Address => "address",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
        })
    }
}

/// Something the composer left out, or added on request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    PhotoSkipped,
    ContactSkipped(ContactField),
    /// An address was given without a postal code. The city is still drawn.
    PostalCodeMissing,
    SectionSkipped(Section),
    CoursesSkipped,
    CreditAdded,
}

impl Notice {
    pub fn level(&self) -> log::Level {
        match self {
            Notice::PostalCodeMissing => log::Level::Warn,
            _ => log::Level::Info,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PhotoSkipped => write!(f, "Skipped photo"),
            Notice::ContactSkipped(field) => write!(f, "Skipped {}", field),
            Notice::PostalCodeMissing => write!(f, "Missing postal code"),
            Notice::SectionSkipped(section) => write!(f, "Skipped {} section", section),
            Notice::CoursesSkipped => write!(f, "Skipped courses"),
            Notice::CreditAdded => write!(f, "Added credit"),
        }
    }
}

pub trait Observer {
    fn notice(&mut self, notice: Notice);
}

/// Forwards notices to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn notice(&mut self, notice: Notice) {
        log::log!(notice.level(), "{}", notice);
    }
}

impl Observer for Vec<Notice> {
    fn notice(&mut self, notice: Notice) {
        self.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Notice::PhotoSkipped.to_string(), "Skipped photo");
        assert_eq!(
            Notice::ContactSkipped(ContactField::Phone).to_string(),
            "Skipped phone"
        );
        assert_eq!(
            Notice::SectionSkipped(Section::Education).to_string(),
            "Skipped education section"
        );
    }

    #[test]
    fn test_postal_code_is_a_warning() {
        assert_eq!(Notice::PostalCodeMissing.level(), log::Level::Warn);
        assert_eq!(Notice::CoursesSkipped.level(), log::Level::Info);
    }

    #[test]
    fn test_vec_collects_in_order() {
        let mut notices: Vec<Notice> = Vec::new();
        notices.notice(Notice::PhotoSkipped);
        notices.notice(Notice::CreditAdded);
        assert_eq!(notices, vec![Notice::PhotoSkipped, Notice::CreditAdded]);
    }
}
