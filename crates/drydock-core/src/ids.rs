//! Repair UID formatting.
//!
//! A repair UID looks like `REP-20240131-A3F8B2`: the UTC calendar day the
//! repair was opened in the system, followed by three random bytes rendered as
//! upper-case hex. The random suffix is produced by the database
//! (`randomblob`), this module only formats and validates.

use chrono::NaiveDate;

/// Prefix shared by every repair UID.
pub const REPAIR_UID_PREFIX: &str = "REP";

/// Number of hex characters in the random suffix.
pub const REPAIR_UID_SUFFIX_LEN: usize = 6;

/// Build a repair UID from a creation day and a hex suffix.
///
/// The suffix is upper-cased so UIDs compare byte-for-byte regardless of how
/// the random source renders hex.
#[must_use]
pub fn format_repair_uid(day: NaiveDate, suffix: &str) -> String {
    format!(
        "{REPAIR_UID_PREFIX}-{}-{}",
        day.format("%Y%m%d"),
        suffix.to_ascii_uppercase()
    )
}

/// Check that `uid` matches `REP-<YYYYMMDD>-<6 upper-case hex>`.
#[must_use]
pub fn is_valid_repair_uid(uid: &str) -> bool {
    let mut parts = uid.splitn(3, '-');
    let (Some(prefix), Some(day), Some(suffix)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefix == REPAIR_UID_PREFIX
        && day.len() == 8
        && NaiveDate::parse_from_str(day, "%Y%m%d").is_ok()
        && suffix.len() == REPAIR_UID_SUFFIX_LEN
        && suffix
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn format_uppercases_suffix() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(format_repair_uid(day, "a3f8b2"), "REP-20240131-A3F8B2");
    }

    #[test]
    fn formatted_uid_is_valid() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert!(is_valid_repair_uid(&format_repair_uid(day, "00ff10")));
    }

    #[rstest]
    #[case("REP-20240131-A3F8B2", true)]
    #[case("REP-20240131-a3f8b2", false)]
    #[case("REP-20240231-A3F8B2", false)]
    #[case("REP-2024013-A3F8B2", false)]
    #[case("REP-20240131-A3F8B", false)]
    #[case("REP-20240131-A3F8B2C", false)]
    #[case("FIX-20240131-A3F8B2", false)]
    #[case("REP-20240131", false)]
    #[case("", false)]
    fn validates_uid_shape(#[case] uid: &str, #[case] expected: bool) {
        assert_eq!(is_valid_repair_uid(uid), expected, "{uid}");
    }
}
