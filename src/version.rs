//! Build metadata stamped by `build.rs`.

pub const GIT_HASH: &str = env!("GIT_HASH");
pub const GIT_DIRTY: bool = matches!(env!("GIT_DIRTY").as_bytes(), b"true");

pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Version string including a `-dirty` marker for uncommitted builds.
pub fn long_version() -> String {
   let dirty = if GIT_DIRTY { "-dirty" } else { "" };
   format!("{} ({GIT_HASH}{dirty})", env!("CARGO_PKG_VERSION"))
}
