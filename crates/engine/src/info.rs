//! Library identity strings.

/// Library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Name and version, e.g. `Tessera/0.1.0`.
pub fn signature() -> &'static str {
    concat!("Tessera/", env!("CARGO_PKG_VERSION"))
}

/// Build identity: version plus the journal format it reads and writes.
pub fn identity() -> &'static str {
    concat!("tessera-", env!("CARGO_PKG_VERSION"), "-tsj1")
}

/// Copyright notice.
pub fn copyright() -> &'static str {
    concat!(
        "Copyright (C) ",
        env!("CARGO_PKG_AUTHORS"),
        ". Licensed under ",
        env!("CARGO_PKG_LICENSE"),
        "."
    )
}
