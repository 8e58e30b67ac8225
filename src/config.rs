/// Run-wide options, threaded explicitly into the sweep and its probes.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Interface to take the network range from instead of the first `en*`/`eth*` one.
    pub interface: Option<String>,
    /// Emit a line before and after every probe.
    pub verbose: bool,
    pub debug: bool,
}

impl Config {
    pub fn new(interface: Option<String>, verbose: bool, debug: bool) -> Self {
        Self {
            interface,
            verbose,
            debug,
        }
    }
}
