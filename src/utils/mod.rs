pub mod clock;
pub mod dates;
pub mod format;
pub mod hijri;
