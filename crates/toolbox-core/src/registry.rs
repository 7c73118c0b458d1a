//! The tool registry.
//!
//! Definitions are validated once, when the registry is built, so a malformed
//! entry stops the host at startup instead of surfacing as a broken button.
//! There is no dynamic registration.

use std::collections::{HashMap, HashSet};

use toolbox_model::Category;

use crate::catalog;
use crate::definition::ToolDefinition;
use crate::error::RegistryError;

/// Immutable, validated set of tools.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Validate `definitions` and order them by category, keeping insertion
    /// order within a category.
    pub fn new(definitions: Vec<ToolDefinition>) -> Result<Self, RegistryError> {
        let mut tools = Vec::with_capacity(definitions.len());
        let mut seen = HashSet::new();
        for definition in definitions {
            validate(&definition)?;
            if !seen.insert(definition.id) {
                return Err(RegistryError::DuplicateId(definition.id.to_string()));
            }
            tools.push(definition);
        }
        tools.sort_by_key(|tool| tool.category);

        let index = tools
            .iter()
            .enumerate()
            .map(|(position, tool)| (tool.id, position))
            .collect();
        tracing::debug!(tools = tools.len(), "tool registry built");
        Ok(Self { tools, index })
    }

    /// The built-in catalog.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(catalog::builtin_tools())
    }

    pub fn lookup(&self, id: &str) -> Option<&ToolDefinition> {
        self.index.get(id).map(|&position| &self.tools[position])
    }

    /// Look up a tool the caller knows exists.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered. Tool ids come from the registry
    /// itself, so an unknown id is a programming error.
    pub fn get(&self, id: &str) -> &ToolDefinition {
        match self.lookup(id) {
            Some(tool) => tool,
            None => panic!("unknown tool id '{id}'"),
        }
    }

    /// All tools, grouped by category in display order.
    pub fn all(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Non-empty categories with their tools.
    pub fn by_category(&self) -> Vec<(Category, Vec<&ToolDefinition>)> {
        Category::ALL
            .iter()
            .map(|&category| {
                let tools: Vec<&ToolDefinition> = self
                    .tools
                    .iter()
                    .filter(|tool| tool.category == category)
                    .collect();
                (category, tools)
            })
            .filter(|(_, tools)| !tools.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn validate(tool: &ToolDefinition) -> Result<(), RegistryError> {
    if tool.id.trim().is_empty() {
        return Err(RegistryError::EmptyId);
    }
    let missing = |field: &'static str| RegistryError::MissingField {
        id: tool.id.to_string(),
        field,
    };
    if tool.title.trim().is_empty() {
        return Err(missing("title"));
    }

    for &mode in tool.modes() {
        let missing_for_mode = |field: &'static str| RegistryError::MissingModeField {
            id: tool.id.to_string(),
            field,
            mode,
        };
        if tool.placeholder(mode).is_empty() {
            return Err(missing_for_mode("placeholder"));
        }
        if tool.syntax_language(mode).is_empty() {
            return Err(missing_for_mode("language"));
        }
        let labels = tool.labels(mode);
        if labels.action_text.is_empty() {
            return Err(missing("action label"));
        }
        if tool.supports_modes {
            let caption = if mode.is_encode() {
                labels.encode_text
            } else {
                labels.decode_text
            };
            if caption.is_empty() {
                return Err(missing_for_mode("mode label"));
            }
        }
    }
    Ok(())
}
