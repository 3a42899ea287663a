pub mod canonical;
pub mod record;
pub mod sv_type;

// re-export for cleaner imports
pub use self::canonical::CanonicalRecord;
pub use self::record::{InfoFields, RawRecord};
pub use self::sv_type::SvType;
