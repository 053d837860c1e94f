use std::collections::HashMap;
use std::ffi::{CStr, CString};

use log::{debug, warn};

/// One option a core declared through SET_VARIABLES.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub key: String,
    pub description: String,
    pub choices: Vec<String>,
    value: CString,
}

impl Variable {
    pub fn value(&self) -> &str {
        self.value.to_str().unwrap_or_default()
    }
}

/// Splits `"Description; a|b|c"` into the description and its choices.
pub fn parse_definition(definition: &str) -> Option<(String, Vec<String>)> {
    let (description, choices) = definition.split_once(';')?;
    let choices: Vec<String> = choices
        .trim_start()
        .split('|')
        .filter(|choice| !choice.is_empty())
        .map(str::to_owned)
        .collect();
    if choices.is_empty() {
        return None;
    }
    Some((description.trim().to_owned(), choices))
}

/// Core options and the values the frontend answers with.
///
/// Values start at the first declared choice unless the user configured an
/// override that is one of the choices.
#[derive(Debug, Default)]
pub struct CoreVariables {
    variables: Vec<Variable>,
    overrides: HashMap<String, String>,
    updated: bool,
}

impl CoreVariables {
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self {
            overrides,
            ..Self::default()
        }
    }

    /// Replaces the declared set. Returns how many definitions were accepted.
    pub fn define<'a>(&mut self, definitions: impl IntoIterator<Item = (&'a str, &'a str)>) -> usize {
        self.variables.clear();
        for (key, definition) in definitions {
            let Some((description, choices)) = parse_definition(definition) else {
                warn!("Ignoring malformed core option {key:?}: {definition:?}");
                continue;
            };

            let initial = match self.overrides.get(key) {
                Some(value) if choices.iter().any(|choice| choice == value) => value.clone(),
                Some(value) => {
                    warn!("Configured value {value:?} is not a choice for {key:?}; using default");
                    choices[0].clone()
                }
                None => choices[0].clone(),
            };
            let Ok(value) = CString::new(initial) else {
                continue;
            };

            debug!("Core option {key} = {:?} ({description})", value);
            self.variables.push(Variable {
                key: key.to_owned(),
                description,
                choices,
                value,
            });
        }
        self.updated = true;
        self.variables.len()
    }

    pub fn get(&self, key: &str) -> Option<&CStr> {
        self.variables
            .iter()
            .find(|var| var.key == key)
            .map(|var| var.value.as_c_str())
    }

    /// Changes a value at runtime. Only declared choices are accepted.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let Some(var) = self.variables.iter_mut().find(|var| var.key == key) else {
            return false;
        };
        if !var.choices.iter().any(|choice| choice == value) {
            return false;
        }
        let Ok(value) = CString::new(value) else {
            return false;
        };
        if var.value != value {
            var.value = value;
            self.updated = true;
        }
        true
    }

    /// Reports and clears the "changed since last asked" flag.
    pub fn take_updated(&mut self) -> bool {
        std::mem::take(&mut self.updated)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.variables.clear();
        self.updated = false;
    }
}
