use metrics::{gauge, Label};

/// Publish the constant build info series for this agent.
///
/// Setting the same gauge again for every configured endpoint is harmless,
/// so callers may invoke this once per endpoint.
pub fn register() {
    let labels = vec![
        Label::new("name", env!("CARGO_PKG_NAME")),
        Label::new("version", env!("CARGO_PKG_VERSION")),
    ];
    gauge!("tamarin_build_info", labels).set(1.0);
}
