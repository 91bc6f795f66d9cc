//! Helpers shared by the registry and factory tests
//!
//! `StubLoader` handles `*.plugin` text files of `key=value` lines:
//!
//! ```text
//! identifier=org.example.test
//! kind=manager
//! ```
//!
//! `kind` is one of `manager`, `ui`, `plain`, `failing` (a manager plugin
//! whose construction fails) or `broken` (rejected by the loader).

use crate::{
    LoadedPlugin, ManagerInterface, ManagerPlugin, Plugin, PluginLoadError, PluginLoader,
    UIDelegateInterface, UIDelegatePlugin,
};
use assetio_core::{AssetIoError, Result};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Clone, Copy, PartialEq)]
enum StubKind {
    Manager,
    UIDelegate,
    Plain,
    Failing,
}

pub(crate) struct StubPlugin {
    identifier: String,
    kind: StubKind,
}

impl Plugin for StubPlugin {
    fn identifier(&self) -> String {
        self.identifier.clone()
    }

    fn as_manager_plugin(&self) -> Option<&(dyn ManagerPlugin + 'static)> {
        match self.kind {
            StubKind::Manager | StubKind::Failing => Some(self),
            _ => None,
        }
    }

    fn as_ui_delegate_plugin(&self) -> Option<&(dyn UIDelegatePlugin + 'static)> {
        match self.kind {
            StubKind::UIDelegate => Some(self),
            _ => None,
        }
    }
}

impl ManagerPlugin for StubPlugin {
    fn interface(&self) -> Result<Box<dyn ManagerInterface>> {
        if self.kind == StubKind::Failing {
            return Err(AssetIoError::configuration(format!(
                "{} could not be constructed",
                self.identifier
            )));
        }
        Ok(Box::new(StubImplementation(self.identifier.clone())))
    }
}

impl UIDelegatePlugin for StubPlugin {
    fn interface(&self) -> Result<Box<dyn UIDelegateInterface>> {
        Ok(Box::new(StubImplementation(self.identifier.clone())))
    }
}

pub(crate) struct StubImplementation(String);

impl ManagerInterface for StubImplementation {
    fn identifier(&self) -> String {
        self.0.clone()
    }

    fn display_name(&self) -> String {
        format!("Stub {}", self.0)
    }
}

impl UIDelegateInterface for StubImplementation {
    fn identifier(&self) -> String {
        self.0.clone()
    }

    fn display_name(&self) -> String {
        format!("Stub UI {}", self.0)
    }
}

pub(crate) struct StubLoader;

impl PluginLoader for StubLoader {
    fn name(&self) -> &str {
        "stub"
    }

    fn is_candidate(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "plugin")
    }

    fn load(&self, path: &Path) -> std::result::Result<LoadedPlugin, PluginLoadError> {
        let invalid = |reason: &str| PluginLoadError::InvalidPlugin {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };
        let text = fs::read_to_string(path).map_err(|e| invalid(&e.to_string()))?;
        let fields: HashMap<&str, &str> = text
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.trim(), v.trim()))
            .collect();

        let kind = match fields.get("kind").copied().unwrap_or("manager") {
            "manager" => StubKind::Manager,
            "ui" => StubKind::UIDelegate,
            "plain" => StubKind::Plain,
            "failing" => StubKind::Failing,
            other => return Err(invalid(&format!("unknown kind '{}'", other))),
        };
        let identifier = fields.get("identifier").copied().unwrap_or_default().to_string();
        LoadedPlugin::new(path, Box::new(StubPlugin { identifier, kind }))
    }
}

/// Write a stub plugin description into `dir`.
pub(crate) fn write_plugin(dir: &Path, file_name: &str, identifier: &str, kind: &str) {
    fs::write(
        dir.join(file_name),
        format!("identifier={}\nkind={}\n", identifier, kind),
    )
    .unwrap();
}

/// Log events recorded while a closure ran
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedLogs {
    pub(crate) fn at(&self, level: Level) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub(crate) fn warnings(&self) -> Vec<String> {
        self.at(Level::WARN)
    }
}

struct CaptureLayer(CapturedLogs);

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        let level = *event.metadata().level();
        (self.0).0.lock().unwrap().push((level, visitor.0));
    }
}

/// Run `f` with a subscriber that records every event.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer(logs.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs)
}
