//! End-to-end pipeline flow tests with fake collaborators.
//!
//! These cover the pipeline's ordering and cleanup guarantees: the bridge
//! config reset runs exactly once per invocation whether the run ends in
//! success, a failed bridge CLI, a failed native build, a skip, an IDE
//! handoff or a shutdown signal.

use async_trait::async_trait;
use bridgepack::pipeline::{
    BridgeCli, BridgeConfig, BuildContext, Bundler, ContextBuilder, Error, IdeOpener,
    NativeBuilder, Outcome, Pipeline, Result, ShutdownSignal, StageResult, TargetPlatform,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Shared, ordered record of collaborator invocations.
#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<&'static str>>,
}

impl Recorder {
    fn log(&self, event: &'static str) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }

    fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|&&e| e == event).count()
    }
}

struct FakeBundler {
    rec: Arc<Recorder>,
    fail: bool,
}

#[async_trait]
impl Bundler for FakeBundler {
    async fn build(&self, ctx: &BuildContext, _label: &str) -> Result<PathBuf> {
        self.rec.log("bundle");
        if self.fail {
            return Err(Error::Bundle("bundler exploded".to_string()));
        }
        Ok(ctx.dist_dir().to_path_buf())
    }
}

struct FakeConfig {
    rec: Arc<Recorder>,
}

impl BridgeConfig for FakeConfig {
    fn prepare(&self, _ctx: &BuildContext) -> Result<()> {
        self.rec.log("prepare");
        Ok(())
    }

    fn finalize_for_build(&self, _target: TargetPlatform) -> Result<()> {
        self.rec.log("finalize");
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        self.rec.log("reset");
        Ok(())
    }
}

struct FakeBridge {
    rec: Arc<Recorder>,
    exit: i32,
}

#[async_trait]
impl BridgeCli for FakeBridge {
    async fn prepare(&self, _ctx: &BuildContext) -> Result<StageResult> {
        self.rec.log("bridge");
        Ok(StageResult {
            code: Some(self.exit),
            diagnostic: None,
        })
    }
}

/// Bridge CLI that signals it has started, then never finishes. Used to
/// park the pipeline mid-stage for the shutdown test.
struct HangingBridge {
    rec: Arc<Recorder>,
    started: Arc<Notify>,
}

#[async_trait]
impl BridgeCli for HangingBridge {
    async fn prepare(&self, _ctx: &BuildContext) -> Result<StageResult> {
        self.rec.log("bridge");
        self.started.notify_one();
        std::future::pending().await
    }
}

struct FakeNative {
    rec: Arc<Recorder>,
    exit: i32,
}

#[async_trait]
impl NativeBuilder for FakeNative {
    fn pre_fix(&self, _ctx: &BuildContext) -> Result<()> {
        self.rec.log("pre_fix");
        Ok(())
    }

    async fn clean_stale(&self, _ctx: &BuildContext) -> Result<()> {
        self.rec.log("clean");
        Ok(())
    }

    async fn build(&self, _ctx: &BuildContext) -> Result<StageResult> {
        self.rec.log("native_build");
        Ok(StageResult {
            code: Some(self.exit),
            diagnostic: None,
        })
    }

    async fn relocate(&self, ctx: &BuildContext) -> Result<PathBuf> {
        self.rec.log("relocate");
        Ok(ctx.packaged_dir())
    }
}

struct FakeIde {
    rec: Arc<Recorder>,
}

#[async_trait]
impl IdeOpener for FakeIde {
    async fn open(&self, _ctx: &BuildContext) -> Result<()> {
        self.rec.log("ide");
        Ok(())
    }
}

struct NeverShutdown;

#[async_trait]
impl ShutdownSignal for NeverShutdown {
    async fn wait(&self) {
        std::future::pending().await
    }
}

/// Shutdown that fires once the hanging bridge stage has been entered.
struct NotifiedShutdown {
    started: Arc<Notify>,
}

#[async_trait]
impl ShutdownSignal for NotifiedShutdown {
    async fn wait(&self) {
        self.started.notified().await
    }
}

fn context(target: TargetPlatform) -> BuildContext {
    ContextBuilder::new()
        .target(target)
        .project_dir("/work/app")
        .debug(true)
        .build()
        .unwrap()
}

fn pipeline(
    rec: &Arc<Recorder>,
    bundler_fail: bool,
    bridge_exit: i32,
    native_exit: i32,
) -> Pipeline {
    Pipeline::new(
        Box::new(FakeBundler {
            rec: Arc::clone(rec),
            fail: bundler_fail,
        }),
        Arc::new(FakeConfig {
            rec: Arc::clone(rec),
        }),
        Box::new(FakeBridge {
            rec: Arc::clone(rec),
            exit: bridge_exit,
        }),
        Box::new(FakeNative {
            rec: Arc::clone(rec),
            exit: native_exit,
        }),
        Box::new(FakeIde {
            rec: Arc::clone(rec),
        }),
        Box::new(NeverShutdown),
    )
}

#[tokio::test]
async fn happy_path_relocates_artifact_and_resets_once() {
    let rec = Arc::new(Recorder::default());
    let ctx = context(TargetPlatform::Android);

    let outcome = pipeline(&rec, false, 0, 0).run(&ctx).await.unwrap();

    match outcome {
        Outcome::Packaged { artifact_dir } => {
            assert_eq!(artifact_dir, ctx.packaged_dir());
        }
        other => panic!("expected Packaged, got {:?}", other),
    }

    assert_eq!(
        rec.events(),
        [
            "bundle",
            "pre_fix",
            "prepare",
            "bridge",
            "finalize",
            "clean",
            "native_build",
            "relocate",
            "reset"
        ]
    );
}

#[tokio::test]
async fn happy_path_holds_for_ios_too() {
    let rec = Arc::new(Recorder::default());
    let ctx = context(TargetPlatform::Ios);

    let outcome = pipeline(&rec, false, 0, 0).run(&ctx).await.unwrap();

    assert!(matches!(outcome, Outcome::Packaged { .. }));
    assert_eq!(rec.count("reset"), 1);
}

#[tokio::test]
async fn native_build_failure_is_non_fatal_and_copies_nothing() {
    let rec = Arc::new(Recorder::default());
    let ctx = context(TargetPlatform::Android);

    let outcome = pipeline(&rec, false, 0, 1).run(&ctx).await.unwrap();

    assert!(matches!(outcome, Outcome::PackageFailed));
    assert_eq!(rec.count("relocate"), 0);
    assert_eq!(rec.count("reset"), 1);
}

#[tokio::test]
async fn bridge_failure_resets_config_before_surfacing_fatal_error() {
    let rec = Arc::new(Recorder::default());
    let ctx = context(TargetPlatform::Android);

    let err = pipeline(&rec, false, 1, 0).run(&ctx).await.unwrap_err();

    assert!(matches!(err, Error::BridgeCli { code: Some(1) }));
    // reset happened, and it happened after the bridge stage
    assert_eq!(
        rec.events(),
        ["bundle", "pre_fix", "prepare", "bridge", "reset"]
    );
    assert_eq!(rec.count("native_build"), 0);
    assert_eq!(rec.count("finalize"), 0);
}

#[tokio::test]
async fn bundler_failure_aborts_before_any_bridge_mutation() {
    let rec = Arc::new(Recorder::default());
    let ctx = context(TargetPlatform::Android);

    let err = pipeline(&rec, true, 0, 0).run(&ctx).await.unwrap_err();

    assert!(matches!(err, Error::Bundle(_)));
    assert_eq!(rec.count("prepare"), 0);
    // nothing was prepared, so nothing needs resetting
    assert_eq!(rec.count("reset"), 0);
}

#[tokio::test]
async fn skip_pkg_never_builds_and_resets_once() {
    let rec = Arc::new(Recorder::default());
    let ctx = ContextBuilder::new()
        .target(TargetPlatform::Android)
        .project_dir("/work/app")
        .skip_pkg(true)
        .build()
        .unwrap();

    let outcome = pipeline(&rec, false, 0, 0).run(&ctx).await.unwrap();

    assert!(matches!(
        outcome,
        Outcome::SkippedPackaging { config_kept: false }
    ));
    assert_eq!(rec.count("native_build"), 0);
    assert_eq!(rec.count("relocate"), 0);
    assert_eq!(rec.count("ide"), 0);
    assert_eq!(rec.count("finalize"), 1);
    assert_eq!(rec.count("reset"), 1);
}

#[tokio::test]
async fn skip_pkg_with_keep_prepared_defers_the_reset() {
    let rec = Arc::new(Recorder::default());
    let ctx = ContextBuilder::new()
        .target(TargetPlatform::Android)
        .project_dir("/work/app")
        .skip_pkg(true)
        .keep_prepared(true)
        .build()
        .unwrap();

    let outcome = pipeline(&rec, false, 0, 0).run(&ctx).await.unwrap();

    assert!(matches!(
        outcome,
        Outcome::SkippedPackaging { config_kept: true }
    ));
    assert_eq!(rec.count("reset"), 0);
}

#[tokio::test]
async fn ide_handoff_opens_ide_without_building() {
    let rec = Arc::new(Recorder::default());
    let ctx = ContextBuilder::new()
        .target(TargetPlatform::Ios)
        .project_dir("/work/app")
        .open_ide(true)
        .build()
        .unwrap();

    let outcome = pipeline(&rec, false, 0, 0).run(&ctx).await.unwrap();

    assert!(matches!(outcome, Outcome::IdeOpened));
    assert_eq!(
        rec.events(),
        ["bundle", "pre_fix", "prepare", "bridge", "finalize", "ide", "reset"]
    );
}

#[tokio::test]
async fn shutdown_mid_bridge_restores_config_exactly_once() {
    let rec = Arc::new(Recorder::default());
    let started = Arc::new(Notify::new());
    let ctx = context(TargetPlatform::Android);

    let pipeline = Pipeline::new(
        Box::new(FakeBundler {
            rec: Arc::clone(&rec),
            fail: false,
        }),
        Arc::new(FakeConfig {
            rec: Arc::clone(&rec),
        }),
        Box::new(HangingBridge {
            rec: Arc::clone(&rec),
            started: Arc::clone(&started),
        }),
        Box::new(FakeNative {
            rec: Arc::clone(&rec),
            exit: 0,
        }),
        Box::new(FakeIde {
            rec: Arc::clone(&rec),
        }),
        Box::new(NotifiedShutdown { started }),
    );

    let outcome = pipeline.run(&ctx).await.unwrap();

    assert!(matches!(outcome, Outcome::Interrupted));
    assert_eq!(rec.count("reset"), 1);
    assert_eq!(rec.count("native_build"), 0);
}
