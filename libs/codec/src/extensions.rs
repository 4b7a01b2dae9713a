//! Extension-hook registry
//!
//! Vendors extend the protocol by intercepting nested objects, not by
//! changing the base schema. The registry holds at most one hook per
//! (message action, nested object) pair on each side of the codec:
//!
//! - an *after-parse* hook receives the raw nested document plus the
//!   constructed value and may return a replacement value of the same type
//! - a *before-serialize* hook receives the serialized object and may return
//!   a rewritten one
//!
//! Absent hooks are the common case and cost one map lookup. Hooks must not
//! alter correlation identity (request id, network path); they only see
//! nested payload objects, which enforces that structurally.
//!
//! Hooks are registered per concrete value type; a hook registered under the
//! wrong type is skipped with a `debug!` rather than corrupting the value.

use crate::field::JsonObject;
use once_cell::sync::Lazy;
use std::any::Any;
use std::collections::HashMap;
use tracing::{debug, trace};

type HookKey = (&'static str, &'static str);

/// Type-erased after-parse hook; the payload is a
/// `Box<dyn Fn(&JsonObject, T) -> T + Send + Sync>` for some concrete `T`.
struct ParseHook(Box<dyn Any + Send + Sync>);

type SerializeHook = Box<dyn Fn(JsonObject) -> JsonObject + Send + Sync>;

/// Registry of vendor hooks, keyed by (message action, nested object name).
#[derive(Default)]
pub struct ExtensionRegistry {
    after_parse: HashMap<HookKey, ParseHook>,
    before_serialize: HashMap<HookKey, SerializeHook>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an after-parse hook for one nested object of one message.
    ///
    /// Replaces any previously registered hook for the same pair.
    pub fn register_parse_hook<T: 'static>(
        &mut self,
        action: &'static str,
        nested: &'static str,
        hook: impl Fn(&JsonObject, T) -> T + Send + Sync + 'static,
    ) {
        let boxed: Box<dyn Fn(&JsonObject, T) -> T + Send + Sync> = Box::new(hook);
        self.after_parse
            .insert((action, nested), ParseHook(Box::new(boxed)));
    }

    /// Register a before-serialize hook for one nested object of one message.
    pub fn register_serialize_hook(
        &mut self,
        action: &'static str,
        nested: &'static str,
        hook: impl Fn(JsonObject) -> JsonObject + Send + Sync + 'static,
    ) {
        self.before_serialize.insert((action, nested), Box::new(hook));
    }

    /// Run the after-parse hook for `(action, nested)`, if any.
    ///
    /// Pass-through when no hook is registered or the hook was registered
    /// under a different value type.
    pub fn apply_parse<T: 'static>(
        &self,
        action: &'static str,
        nested: &'static str,
        raw: &JsonObject,
        value: T,
    ) -> T {
        let Some(stored) = self.after_parse.get(&(action, nested)) else {
            return value;
        };
        match stored
            .0
            .downcast_ref::<Box<dyn Fn(&JsonObject, T) -> T + Send + Sync>>()
        {
            Some(hook) => {
                trace!(action, nested, "applying after-parse extension hook");
                hook(raw, value)
            }
            None => {
                debug!(
                    action,
                    nested, "after-parse hook registered under a different type; skipping"
                );
                value
            }
        }
    }

    /// Run the before-serialize hook for `(action, nested)`, if any.
    pub fn apply_serialize(
        &self,
        action: &'static str,
        nested: &'static str,
        obj: JsonObject,
    ) -> JsonObject {
        match self.before_serialize.get(&(action, nested)) {
            Some(hook) => {
                trace!(action, nested, "applying before-serialize extension hook");
                hook(obj)
            }
            None => obj,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.after_parse.is_empty() && self.before_serialize.is_empty()
    }
}

static EMPTY_REGISTRY: Lazy<ExtensionRegistry> = Lazy::new(ExtensionRegistry::new);

/// The registry handle threaded through one message's parse or serialize
/// pass: the registry plus the action name of the message being processed.
#[derive(Clone, Copy)]
pub struct Ext<'a> {
    registry: &'a ExtensionRegistry,
    action: &'static str,
}

impl<'a> Ext<'a> {
    pub fn new(registry: &'a ExtensionRegistry, action: &'static str) -> Self {
        Self { registry, action }
    }

    /// A handle with no hooks registered, for callers without extensions.
    pub fn disabled(action: &'static str) -> Ext<'static> {
        Ext {
            registry: &EMPTY_REGISTRY,
            action,
        }
    }

    pub fn action(&self) -> &'static str {
        self.action
    }

    pub fn after_parse<T: 'static>(&self, nested: &'static str, raw: &JsonObject, value: T) -> T {
        self.registry.apply_parse(self.action, nested, raw, value)
    }

    pub fn before_serialize(&self, nested: &'static str, obj: JsonObject) -> JsonObject {
        self.registry.apply_serialize(self.action, nested, obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Widget {
        label: String,
    }

    #[test]
    fn absent_hook_is_a_passthrough() {
        let registry = ExtensionRegistry::new();
        let ext = Ext::new(&registry, "Authorize");
        let raw = JsonObject::new();
        let widget = Widget {
            label: "w".to_string(),
        };
        assert_eq!(ext.after_parse("widget", &raw, widget.clone()), widget);
    }

    #[test]
    fn parse_hook_rewrites_the_constructed_value() {
        let mut registry = ExtensionRegistry::new();
        registry.register_parse_hook("Authorize", "widget", |raw: &JsonObject, mut w: Widget| {
            if let Some(tag) = raw.get("vendorTag").and_then(|v| v.as_str()) {
                w.label = format!("{}+{tag}", w.label);
            }
            w
        });
        let ext = Ext::new(&registry, "Authorize");

        let mut raw = JsonObject::new();
        raw.insert("vendorTag".to_string(), json!("x1"));
        let out = ext.after_parse(
            "widget",
            &raw,
            Widget {
                label: "w".to_string(),
            },
        );
        assert_eq!(out.label, "w+x1");
    }

    #[test]
    fn hook_keys_are_per_action_and_nested_type() {
        let mut registry = ExtensionRegistry::new();
        registry.register_parse_hook("Authorize", "widget", |_: &JsonObject, mut w: Widget| {
            w.label.push('!');
            w
        });
        let ext = Ext::new(&registry, "BootNotification");
        let raw = JsonObject::new();
        let widget = Widget {
            label: "w".to_string(),
        };
        // Different action, same nested name: no hook fires.
        assert_eq!(ext.after_parse("widget", &raw, widget.clone()), widget);
    }

    #[test]
    fn mistyped_hook_is_skipped() {
        let mut registry = ExtensionRegistry::new();
        registry.register_parse_hook("Authorize", "widget", |_: &JsonObject, s: String| s + "!");
        let ext = Ext::new(&registry, "Authorize");
        let raw = JsonObject::new();
        let widget = Widget {
            label: "w".to_string(),
        };
        assert_eq!(ext.after_parse("widget", &raw, widget.clone()), widget);
    }

    #[test]
    fn serialize_hook_rewrites_the_object() {
        let mut registry = ExtensionRegistry::new();
        registry.register_serialize_hook("Authorize", "widget", |mut obj| {
            obj.insert("vendorTag".to_string(), json!("x1"));
            obj
        });
        let ext = Ext::new(&registry, "Authorize");
        let out = ext.before_serialize("widget", JsonObject::new());
        assert_eq!(out.get("vendorTag"), Some(&json!("x1")));
    }
}
