/// URL parser state machine states
/// Based on WHATWG URL Standard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Scheme start state
    SchemeStart,
    /// Scheme state
    Scheme,
    /// No scheme state
    NoScheme,
    /// Special relative or authority state
    SpecialRelativeOrAuthority,
    /// Path or authority state
    PathOrAuthority,
    /// Relative state
    Relative,
    /// Relative slash state
    RelativeSlash,
    /// Special authority slashes state
    SpecialAuthoritySlashes,
    /// Special authority ignore slashes state
    SpecialAuthorityIgnoreSlashes,
    /// Authority state
    Authority,
    /// Host state (start mode for the host setter)
    Host,
    /// Hostname state: like Host, but a port separator terminates
    Hostname,
    /// Port state (start mode for the port setter)
    Port,
    /// File state
    File,
    /// File slash state
    FileSlash,
    /// File host state
    FileHost,
    /// Path start state (start mode for the pathname setter)
    PathStart,
    /// Path state
    Path,
    /// Opaque path state (for non-special schemes without authority)
    OpaquePath,
    /// Query state
    Query,
    /// Fragment state
    Fragment,
}
