//! Recipe input (module descriptors).
//!
//! Args are kept as raw JSON values; only the argument resolver and the module
//! itself give them meaning.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::dependency::DependencyGraph;
use crate::error::RecipeError;

/// Raw argument mapping (parameter name -> JSON value).
pub type ModuleArgs = serde_json::Map<String, serde_json::Value>;

/// One module entry of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,

    #[serde(default)]
    pub args: ModuleArgs,

    /// Modules whose run-phase completion this module waits for.
    #[serde(default)]
    pub wants: BTreeSet<String>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: ModuleArgs::new(),
            wants: BTreeSet::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.args.insert(key.into(), value);
        self
    }

    pub fn with_want(mut self, module: impl Into<String>) -> Self {
        self.wants.insert(module.into());
        self
    }
}

/// A declarative pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub modules: Vec<ModuleDescriptor>,
}

impl Recipe {
    pub fn new(modules: Vec<ModuleDescriptor>) -> Self {
        Self {
            name: None,
            description: None,
            modules,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RecipeError> {
        serde_json::from_str(json).map_err(|e| RecipeError::Parse(e.to_string()))
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.name.as_str())
    }

    /// Load-time checks: unique names, known `wants`, no cycles.
    ///
    /// Any of these would otherwise leave a run-phase task waiting forever.
    pub fn validate(&self) -> Result<(), RecipeError> {
        let mut seen = HashSet::new();
        for module in &self.modules {
            if !seen.insert(module.name.as_str()) {
                return Err(RecipeError::DuplicateModule(module.name.clone()));
            }
        }

        let mut graph = DependencyGraph::new();
        for module in &self.modules {
            graph.add_module(module.name.as_str());
            for want in &module.wants {
                if !seen.contains(want.as_str()) {
                    return Err(RecipeError::UnknownDependency {
                        module: module.name.clone(),
                        wants: want.clone(),
                    });
                }
                graph.add_dependency(&module.name, want);
            }
        }

        match graph.detect_cycle() {
            Some(cycle) => Err(RecipeError::Cycle(cycle)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recipe_without_args_or_wants_gets_defaults() {
        let json = r#"
        {
          "name": "triage",
          "modules": [
            { "name": "collector" },
            { "name": "parser", "wants": ["collector"], "args": { "format": "csv" } }
          ]
        }"#;
        let recipe = Recipe::from_json(json).expect("deserialize");
        assert_eq!(recipe.name.as_deref(), Some("triage"));
        assert!(recipe.modules[0].args.is_empty());
        assert!(recipe.modules[0].wants.is_empty());
        assert!(recipe.modules[1].wants.contains("collector"));
        assert_eq!(recipe.modules[1].args["format"], json!("csv"));
        assert!(recipe.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Recipe::from_json("{ \"modules\": 3 }").unwrap_err();
        assert!(matches!(err, RecipeError::Parse(_)));
    }

    #[test]
    fn duplicate_module_names_are_rejected() {
        let recipe = Recipe::new(vec![ModuleDescriptor::new("a"), ModuleDescriptor::new("a")]);
        assert_eq!(
            recipe.validate(),
            Err(RecipeError::DuplicateModule("a".into()))
        );
    }

    #[test]
    fn wanting_an_undeclared_module_is_rejected() {
        let recipe = Recipe::new(vec![ModuleDescriptor::new("a").with_want("ghost")]);
        assert_eq!(
            recipe.validate(),
            Err(RecipeError::UnknownDependency {
                module: "a".into(),
                wants: "ghost".into(),
            })
        );
    }

    #[test]
    fn cyclic_wants_are_rejected() {
        let recipe = Recipe::new(vec![
            ModuleDescriptor::new("a").with_want("c"),
            ModuleDescriptor::new("b").with_want("a"),
            ModuleDescriptor::new("c").with_want("b"),
        ]);
        let Err(RecipeError::Cycle(path)) = recipe.validate() else {
            panic!("expected a cycle");
        };
        assert_eq!(path.first(), path.last());
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn empty_recipe_is_valid() {
        assert!(Recipe::new(vec![]).validate().is_ok());
    }
}
