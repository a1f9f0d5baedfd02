//! Static plugin metadata reported to hosts.

/// Descriptive metadata a host queries once when scanning the plugin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluginInfo {
    /// Display name.
    pub name: &'static str,
    /// Reverse-DNS identifier.
    pub id: &'static str,
    /// Vendor string.
    pub vendor: &'static str,
    /// Version string (the crate version).
    pub version: &'static str,
    /// Seconds of output after the input falls silent.
    pub tail_seconds: f64,
    /// Number of programs. Always one.
    pub num_programs: usize,
    /// Whether MIDI input is consumed.
    pub accepts_midi: bool,
    /// Whether MIDI output is produced.
    pub produces_midi: bool,
    /// Whether a custom editor is provided.
    pub has_editor: bool,
}

impl PluginInfo {
    /// Name of program `index`.
    ///
    /// The single program is unnamed.
    pub fn program_name(&self, index: usize) -> Option<&'static str> {
        (index < self.num_programs).then_some("")
    }
}

/// Metadata for the dry/wet mixer.
pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "Drywet",
    id: "com.ampactor.drywet",
    vendor: "ampactor-labs",
    version: env!("CARGO_PKG_VERSION"),
    tail_seconds: 0.0,
    num_programs: 1,
    accepts_midi: false,
    produces_midi: false,
    has_editor: false,
};
