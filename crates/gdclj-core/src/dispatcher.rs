use crate::bootstrap::{BootstrapLatch, RuntimeBootstrapper, RuntimeOptions};
use crate::check::{Flow, check_pending};
use crate::config::{BridgeConfig, EnvSource};
use crate::error::{BootstrapFailure, BridgeError};
use crate::glue::BridgeContext;
use crate::host::{Host, HostVersion, NoopLifecycle};
use crate::runtime::ManagedRuntime;
use crate::stage::Stage;

const CLOJURE_CORE: &str = "clojure.core";

/// Result of a completed bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub stages: Vec<Stage>,
    pub host_version: Option<HostVersion>,
}

/// Result of a dry run that stops before the entry point is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    pub stages: Vec<Stage>,
    pub namespace: String,
    pub function: String,
}

/// Tracks the last stage reached so failures can say where they happened.
struct Progress {
    stages: Vec<Stage>,
}

impl Progress {
    fn new() -> Self {
        Self {
            stages: vec![Stage::Init],
        }
    }

    fn reached(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Init)
    }

    fn advance(&mut self, stage: Stage) {
        tracing::debug!(stage = %stage, "Bootstrap stage reached");
        self.stages.push(stage);
    }

    fn fail(&self, error: BridgeError) -> BootstrapFailure {
        let reached = self.reached();
        tracing::error!(
            stage = %reached,
            kind = error.kind(),
            error = %error,
            "Bootstrap aborted"
        );
        BootstrapFailure::new(reached, error)
    }
}

/// Namespace loaded and entry point resolved, ready to dispatch.
struct Loaded<R: ManagedRuntime> {
    ctx: BridgeContext<R>,
    entry: R::Object,
}

/// Drives the bootstrap sequence from configuration to the Clojure entry
/// point, stopping at the first failed step.
pub struct EntryDispatcher<'l, B> {
    bootstrapper: B,
    latch: &'l BootstrapLatch,
}

impl<'l, B: RuntimeBootstrapper> EntryDispatcher<'l, B> {
    pub fn new(bootstrapper: B, latch: &'l BootstrapLatch) -> Self {
        Self {
            bootstrapper,
            latch,
        }
    }

    pub fn bootstrapper(&self) -> &B {
        &self.bootstrapper
    }

    /// Run the full sequence: runtime, glue, `require`, entry point, version
    /// diagnostics and lifecycle registration.
    pub fn run<H: Host>(
        &self,
        env: &dyn EnvSource,
        host: &mut H,
    ) -> Result<BootstrapReport, BootstrapFailure> {
        let mut progress = Progress::new();
        let config = BridgeConfig::from_env(env).map_err(|e| progress.fail(e))?;
        let Loaded { mut ctx, entry } = self.load(&config, &mut progress)?;

        let token = host.capability_token();
        let boxed = ctx
            .box_token("box_capability", token)
            .map_err(|e| progress.fail(e))?;
        ctx.invoke("entry_point", &entry, &[&boxed])
            .map_err(|e| progress.fail(e))?;
        progress.advance(Stage::Dispatched);
        tracing::info!(
            namespace = %config.entry.namespace,
            function = %config.entry.function,
            "Clojure entry point returned"
        );

        let host_version = host.version();
        match &host_version {
            Some(version) => println!("{version}"),
            None => tracing::warn!("Host did not report a version"),
        }

        host.register_lifecycle(config.host.minimum_level, &NoopLifecycle)
            .map_err(|e| progress.fail(e))?;
        progress.advance(Stage::Done);

        Ok(BootstrapReport {
            stages: progress.stages,
            host_version,
        })
    }

    /// Load the target namespace and resolve its entry point without
    /// invoking it.
    pub fn preflight(&self, env: &dyn EnvSource) -> Result<PreflightReport, BootstrapFailure> {
        let mut progress = Progress::new();
        let config = BridgeConfig::from_env(env).map_err(|e| progress.fail(e))?;
        self.load(&config, &mut progress)?;

        Ok(PreflightReport {
            stages: progress.stages,
            namespace: config.entry.namespace,
            function: config.entry.function,
        })
    }

    fn load(
        &self,
        config: &BridgeConfig,
        progress: &mut Progress,
    ) -> Result<Loaded<B::Runtime>, BootstrapFailure> {
        let namespace = config.entry.namespace.as_str();
        let function = config.entry.function.as_str();

        self.latch.acquire().map_err(|e| progress.fail(e))?;
        let options = RuntimeOptions::from_config(config);
        tracing::info!(
            classpath = %options.classpath,
            extra_options = options.extra_options.len(),
            "Creating embedded runtime"
        );
        let mut runtime = self
            .bootstrapper
            .create(&options)
            .map_err(|e| progress.fail(e))?;
        if check_pending(&mut runtime, "create_runtime") == Flow::Abort {
            return Err(progress.fail(BridgeError::RuntimeCreation(
                "exception pending after runtime creation".into(),
            )));
        }
        progress.advance(Stage::RuntimeReady);

        let mut ctx = BridgeContext::build(runtime).map_err(|e| progress.fail(e))?;
        progress.advance(Stage::GlueReady);

        let entry = ctx
            .resolve_symbol("entry_point_var", namespace, function)
            .map_err(|e| progress.fail(e))?;
        progress.advance(Stage::EntryResolved);

        let require = ctx
            .resolve_symbol("require_var", CLOJURE_CORE, "require")
            .map_err(|e| progress.fail(e))?;
        progress.advance(Stage::RequireResolved);

        let ns_literal = ctx
            .read_literal("namespace_literal", namespace)
            .map_err(|e| progress.fail(e))?;
        progress.advance(Stage::NamespaceLiteralReady);

        ctx.invoke("require", &require, &[&ns_literal])
            .map_err(|e| progress.fail(e))?;
        progress.advance(Stage::NamespaceLoaded);
        tracing::info!(namespace, "Namespace loaded");

        Ok(Loaded { ctx, entry })
    }
}
