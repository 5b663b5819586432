//! PlaceholderResolver - `@key` プレースホルダの置換
//!
//! # ルール
//! - 文字列全体が `@key` なら、値を JSON の型のまま差し替える（リストや数値も可）
//! - それ以外の文字列は `@key` の出現をすべて文字列として置換（長いキーから順に）
//! - 上書き（overrides）が設定（config）より優先
//! - 解決できないプレースホルダはそのまま残す
//! - 配列とオブジェクトは再帰的にたどる

use serde_json::Value;
use tracing::trace;

use crate::domain::{Config, ModuleArgs, SetupError};
use crate::ports::ArgumentResolver;

#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderResolver;

impl PlaceholderResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ArgumentResolver for PlaceholderResolver {
    fn resolve(
        &self,
        declared: &ModuleArgs,
        overrides: &ModuleArgs,
        config: &Config,
    ) -> Result<ModuleArgs, SetupError> {
        let sources = Sources::new(overrides, config);
        Ok(declared
            .iter()
            .map(|(name, value)| (name.clone(), sources.substitute(value)))
            .collect())
    }
}

/// Lookup order: overrides first, then config.
struct Sources<'a> {
    /// Every known key, longest first so `@paths` is replaced before `@path`.
    keys: Vec<&'a str>,
    overrides: &'a ModuleArgs,
    config: &'a Config,
}

impl<'a> Sources<'a> {
    fn new(overrides: &'a ModuleArgs, config: &'a Config) -> Self {
        let mut keys: Vec<&str> = overrides
            .keys()
            .chain(config.values().keys())
            .map(String::as_str)
            .collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        keys.dedup();
        Self {
            keys,
            overrides,
            config,
        }
    }

    fn lookup(&self, key: &str) -> Option<&'a Value> {
        self.overrides.get(key).or_else(|| self.config.get(key))
    }

    fn substitute(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => self.substitute_str(s),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.substitute(v)).collect()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.substitute(v)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn substitute_str(&self, s: &str) -> Value {
        if let Some(key) = s.strip_prefix('@')
            && let Some(value) = self.lookup(key)
        {
            return value.clone();
        }

        let mut out = s.to_string();
        for key in &self.keys {
            let placeholder = format!("@{key}");
            if !out.contains(&placeholder) {
                continue;
            }
            if let Some(value) = self.lookup(key) {
                trace!(placeholder = %placeholder, "substituting");
                out = out.replace(&placeholder, &display_value(value));
            }
        }
        Value::String(out)
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> ModuleArgs {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn whole_value_placeholder_keeps_json_type() {
        let declared = args(json!({ "paths": "@paths", "limit": "@limit" }));
        let overrides = args(json!({ "paths": ["/var/log/a", "/var/log/b"], "limit": 10 }));

        let resolved = PlaceholderResolver
            .resolve(&declared, &overrides, &Config::new())
            .unwrap();
        assert_eq!(resolved["paths"], json!(["/var/log/a", "/var/log/b"]));
        assert_eq!(resolved["limit"], json!(10));
    }

    #[test]
    fn embedded_placeholders_are_replaced_textually() {
        let declared = args(json!({ "query": "host:@host AND port:@port" }));
        let overrides = args(json!({ "host": "db-01", "port": 5432 }));

        let resolved = PlaceholderResolver
            .resolve(&declared, &overrides, &Config::new())
            .unwrap();
        assert_eq!(resolved["query"], json!("host:db-01 AND port:5432"));
    }

    #[test]
    fn longer_keys_win_over_their_prefixes() {
        let declared = args(json!({ "msg": "@path_list vs @path" }));
        let overrides = args(json!({ "path": "/a", "path_list": "/a,/b" }));

        let resolved = PlaceholderResolver
            .resolve(&declared, &overrides, &Config::new())
            .unwrap();
        assert_eq!(resolved["msg"], json!("/a,/b vs /a"));
    }

    #[test]
    fn overrides_take_precedence_over_config() {
        let declared = args(json!({ "dir": "@workdir", "bucket": "@bucket" }));
        let overrides = args(json!({ "workdir": "/override" }));
        let config = Config::new()
            .with_value("workdir", json!("/from-config"))
            .with_value("bucket", json!("evidence"));

        let resolved = PlaceholderResolver.resolve(&declared, &overrides, &config).unwrap();
        assert_eq!(resolved["dir"], json!("/override"));
        assert_eq!(resolved["bucket"], json!("evidence"));
    }

    #[test]
    fn nested_values_and_unknown_placeholders() {
        let declared = args(json!({
            "targets": ["@host", "static"],
            "options": { "user": "@user", "retries": 3 },
            "untouched": "@nobody"
        }));
        let overrides = args(json!({ "host": "web-02", "user": "analyst" }));

        let resolved = PlaceholderResolver
            .resolve(&declared, &overrides, &Config::new())
            .unwrap();
        assert_eq!(resolved["targets"], json!(["web-02", "static"]));
        assert_eq!(resolved["options"], json!({ "user": "analyst", "retries": 3 }));
        assert_eq!(resolved["untouched"], json!("@nobody"));
    }
}
