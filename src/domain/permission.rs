//! Blog permissions as bitflags.
//!
//! Each bit grants one capability. A permission check passes only when
//! every requested bit is present in the role's mask.

use bitflags::bitflags;

bitflags! {
    /// Permission bits stored in `roles.permissions`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct Permission: u32 {
        /// Follow other users
        const FOLLOW            = 0x01;
        /// Comment on posts
        const COMMENT           = 0x02;
        /// Publish posts
        const WRITE_ARTICLES    = 0x04;
        /// Moderate comments written by others
        const MODERATE_COMMENTS = 0x08;
        /// Full administrative access
        const ADMINISTER        = 0x80;
    }
}

impl Permission {
    /// Mask granted to ordinary accounts.
    pub const USER_DEFAULT: Self = Self::FOLLOW
        .union(Self::COMMENT)
        .union(Self::WRITE_ARTICLES);

    /// Mask granted to moderators.
    pub const MODERATOR_DEFAULT: Self = Self::USER_DEFAULT.union(Self::MODERATE_COMMENTS);

    /// Mask of the administrator role. Includes the reserved bits 0x10-0x40.
    pub const ADMIN_MASK: Self = Self::from_bits_retain(0xff);

    /// Convert a database column value, keeping bits without a name.
    pub fn from_db(value: i32) -> Self {
        // same width, so every stored bit survives
        Self::from_bits_retain(value as u32)
    }

    pub fn to_db(self) -> i32 {
        self.bits() as i32
    }

    /// True when `self` holds every bit of `required`.
    pub fn grants(self, required: Permission) -> bool {
        self & required == required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_values() {
        assert_eq!(Permission::USER_DEFAULT.bits(), 0x07);
        assert_eq!(Permission::MODERATOR_DEFAULT.bits(), 0x0f);
        assert_eq!(Permission::ADMIN_MASK.bits(), 0xff);
        assert!(Permission::ADMIN_MASK.grants(Permission::all()));
    }

    #[test]
    fn test_partial_overlap_is_not_granted() {
        let mask = Permission::FOLLOW | Permission::COMMENT;
        assert!(mask.grants(Permission::FOLLOW));
        assert!(!mask.grants(Permission::FOLLOW | Permission::WRITE_ARTICLES));
        assert!(!Permission::USER_DEFAULT.grants(Permission::ADMINISTER));
    }

    #[test]
    fn test_db_round_trip_keeps_reserved_bits() {
        let mask = Permission::from_db(0xff);
        assert_eq!(mask, Permission::ADMIN_MASK);
        assert_eq!(mask.to_db(), 255);
        assert_eq!(Permission::from_db(0x40).bits(), 0x40);
    }

    #[test]
    fn test_db_round_trip_keeps_bits_above_admin_mask() {
        let wide = Permission::from_db(0x1ff);
        assert_eq!(wide.bits(), 0x1ff);
        assert_eq!(wide.to_db(), 0x1ff);
        assert!(wide.grants(Permission::ADMIN_MASK));
        assert!(!Permission::ADMIN_MASK.grants(wide));
        assert_eq!(Permission::from_db(-1).to_db(), -1);
    }
}
