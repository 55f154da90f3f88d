//! Node parameters and their string-map marshaling.
//!
//! The host application stores every parameter as a string and hands them
//! around in a flat map, so booleans use the `strtobool` token set on the way
//! in and `"True"`/`"False"` on the way out.

use crate::error::{DonutError, Result};
use std::collections::HashMap;

pub const DEFAULT_MODEL: &str = "naver-clova-ix/donut-base-finetuned-docvqa";

/// Configuration of a Donut inference node.
///
/// `update` is a dirty flag: it turns true whenever a field that matters at
/// model load time (`model_name`, `task_name`, `cuda`) changes, and is
/// cleared by the cache after a successful reload. Prompt changes are
/// consumed at inference time only and never set it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonutParam {
    pub model_name: String,
    pub task_name: String,
    pub prompt: String,
    pub cuda: bool,
    pub custom_model_folder: String,
    pub update: bool,
}

impl Default for DonutParam {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            task_name: String::new(),
            prompt: "what is the title".to_string(),
            cuda: true,
            custom_model_folder: String::new(),
            update: false,
        }
    }
}

impl DonutParam {
    /// Overwrites the parameters from a host-provided string map.
    ///
    /// The change comparison runs against the stored values before anything
    /// is overwritten; a differing `model_name`, `task_name` or `cuda` sets
    /// the `update` flag. A missing or malformed `cuda` value fails without
    /// modifying anything; string keys absent from the map leave the
    /// corresponding field untouched.
    pub fn set_values(&mut self, values: &HashMap<String, String>) -> Result<()> {
        let cuda = match values.get("cuda") {
            Some(raw) => parse_bool("cuda", raw)?,
            None => {
                return Err(DonutError::Parse {
                    field: "cuda".to_string(),
                    value: "<missing>".to_string(),
                })
            }
        };
        let model_name = values
            .get("model_name")
            .cloned()
            .unwrap_or_else(|| self.model_name.clone());
        let task_name = values
            .get("task_name")
            .cloned()
            .unwrap_or_else(|| self.task_name.clone());

        if model_name != self.model_name || task_name != self.task_name || cuda != self.cuda {
            self.update = true;
        }
        self.model_name = model_name;
        self.task_name = task_name;
        self.cuda = cuda;
        if let Some(prompt) = values.get("prompt") {
            self.prompt = prompt.clone();
        }
        if let Some(folder) = values.get("custom_model_folder") {
            self.custom_model_folder = folder.clone();
        }
        Ok(())
    }

    /// Serializes the parameters back into the host's string map.
    pub fn get_values(&self) -> HashMap<String, String> {
        HashMap::from([
            ("model_name".to_string(), self.model_name.clone()),
            ("task_name".to_string(), self.task_name.clone()),
            ("prompt".to_string(), self.prompt.clone()),
            ("cuda".to_string(), bool_token(self.cuda).to_string()),
            (
                "custom_model_folder".to_string(),
                self.custom_model_folder.clone(),
            ),
        ])
    }
}

/// Canonical string encoding of a boolean parameter.
pub fn bool_token(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Parses a boolean parameter with the `strtobool` token set.
pub fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
        _ => Err(DonutError::Parse {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_set_round_trip() {
        let param = DonutParam {
            model_name: "naver-clova-ix/donut-base-finetuned-cord-v2".to_string(),
            task_name: "cord-v2".to_string(),
            prompt: "total amount?".to_string(),
            cuda: false,
            custom_model_folder: "/models/custom".to_string(),
            update: false,
        };
        let mut restored = DonutParam::default();
        restored.set_values(&param.get_values()).unwrap();
        assert_eq!(restored.model_name, param.model_name);
        assert_eq!(restored.task_name, param.task_name);
        assert_eq!(restored.prompt, param.prompt);
        assert_eq!(restored.cuda, param.cuda);
        assert_eq!(restored.custom_model_folder, param.custom_model_folder);
        assert_eq!(restored.get_values(), param.get_values());
    }

    #[test]
    fn test_prompt_change_does_not_set_update() {
        let mut param = DonutParam::default();
        let mut values = param.get_values();
        values.insert("prompt".to_string(), "what is the date".to_string());
        param.set_values(&values).unwrap();
        assert!(!param.update);
        assert_eq!(param.prompt, "what is the date");
    }

    #[test]
    fn test_load_relevant_changes_set_update() {
        for (key, value) in [
            ("model_name", "naver-clova-ix/donut-base-finetuned-rvlcdip"),
            ("task_name", "rvlcdip"),
            ("cuda", "False"),
        ] {
            let mut param = DonutParam::default();
            let mut values = param.get_values();
            values.insert(key.to_string(), value.to_string());
            param.set_values(&values).unwrap();
            assert!(param.update, "changing {key} must set the update flag");
        }
    }

    #[test]
    fn test_bool_tokens() {
        for token in ["y", "YES", "t", "True", "on", "1"] {
            assert!(parse_bool("cuda", token).unwrap());
        }
        for token in ["n", "No", "f", "FALSE", "off", "0"] {
            assert!(!parse_bool("cuda", token).unwrap());
        }
    }

    #[test]
    fn test_malformed_bool_names_the_field() {
        let mut param = DonutParam::default();
        let mut values = param.get_values();
        values.insert("cuda".to_string(), "maybe".to_string());
        let err = param.set_values(&values).unwrap_err();
        match err {
            DonutError::Parse { field, value } => {
                assert_eq!(field, "cuda");
                assert_eq!(value, "maybe");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        // a failed update leaves the store untouched
        assert_eq!(param, DonutParam::default());
    }
}
