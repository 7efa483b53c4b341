use std::fmt;

/// Bootstrap progress. Stages are strictly ordered; a failure is reported
/// together with the last stage that was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    RuntimeReady,
    GlueReady,
    EntryResolved,
    RequireResolved,
    NamespaceLiteralReady,
    NamespaceLoaded,
    Dispatched,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Init => write!(f, "init"),
            Stage::RuntimeReady => write!(f, "runtime_ready"),
            Stage::GlueReady => write!(f, "glue_ready"),
            Stage::EntryResolved => write!(f, "entry_resolved"),
            Stage::RequireResolved => write!(f, "require_resolved"),
            Stage::NamespaceLiteralReady => write!(f, "namespace_literal_ready"),
            Stage::NamespaceLoaded => write!(f, "namespace_loaded"),
            Stage::Dispatched => write!(f, "dispatched"),
            Stage::Done => write!(f, "done"),
        }
    }
}
