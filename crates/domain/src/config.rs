use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Platform config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Effective configuration of one platform handle.
///
/// Constructed in code by the embedding surface; this layer does no file or
/// environment loading. The `config` method returns this struct verbatim as
/// the configuration snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Active-session capacity. `create_session` fails with
    /// `ResourceExhausted` once this many sessions are active.
    #[serde(default = "d_1024")]
    pub max_sessions: usize,
    /// Idle seconds after which the staleness sweep closes a session.
    #[serde(default = "d_1800")]
    pub stale_after_secs: u64,
    /// Upper clamp on `max_n` for `get_completions`.
    #[serde(default = "d_25")]
    pub max_completions: usize,
    /// Upper clamp on `max_n` for `get_suggestions`.
    #[serde(default = "d_25")]
    pub max_suggestions: usize,
    /// Namespace label for caller/coordinator address derivation.
    #[serde(default = "d_namespace")]
    pub namespace: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            max_sessions: d_1024(),
            stale_after_secs: d_1800(),
            max_completions: d_25(),
            max_suggestions: d_25(),
            namespace: d_namespace(),
        }
    }
}

fn d_1024() -> usize {
    1024
}

fn d_1800() -> u64 {
    1800
}

fn d_25() -> usize {
    25
}

fn d_namespace() -> String {
    "ariva".to_string()
}
