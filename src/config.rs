//! Toolkit-agnostic configuration surface.
//!
//! Any front-end (GUI form, CLI flags, API call) produces a [`ConfigForm`];
//! [`apply`] folds it into the parameters with the same precedence and
//! dirty-flag rules regardless of where the values came from. [`form_schema`]
//! describes the editing form as data so a front-end can render it with
//! whatever widgets it has.

use crate::param::DonutParam;
use crate::zoo::ModelZoo;

/// Raw option values coming from a front-end.
#[derive(Debug, Clone)]
pub struct ConfigForm {
    pub model_name: String,
    pub task_name: String,
    pub prompt: String,
    pub cuda: bool,
    pub custom_model_folder: String,
}

impl ConfigForm {
    /// Pre-fills a form from the current parameters.
    pub fn from_param(param: &DonutParam) -> Self {
        Self {
            model_name: param.model_name.clone(),
            task_name: param.task_name.clone(),
            prompt: param.prompt.clone(),
            cuda: param.cuda,
            custom_model_folder: param.custom_model_folder.clone(),
        }
    }
}

/// Applies a submitted form to the parameters.
///
/// When no custom model folder is set and the chosen checkpoint is
/// registry-known, its canonical task replaces whatever the form carried.
/// The change comparison runs against the stored parameters before anything
/// is overwritten.
pub fn apply(zoo: &ModelZoo, form: &ConfigForm, param: &mut DonutParam) {
    let task_name = if form.custom_model_folder.is_empty() {
        zoo.default_task(&form.model_name)
            .map(str::to_string)
            .unwrap_or_else(|| form.task_name.clone())
    } else {
        form.task_name.clone()
    };

    if form.model_name != param.model_name
        || task_name != param.task_name
        || form.cuda != param.cuda
    {
        param.update = true;
    }
    param.model_name = form.model_name.clone();
    param.task_name = task_name;
    param.prompt = form.prompt.clone();
    param.cuda = form.cuda;
    param.custom_model_folder = form.custom_model_folder.clone();
}

/// One field of the parameter-editing form.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text entry.
    Text,
    /// Boolean toggle.
    Checkbox,
    /// Selection among known options (editable, custom names are allowed).
    Select { options: Vec<String> },
    /// Filesystem folder picker.
    Folder,
}

/// Describes the editing form for the current parameters.
pub fn form_schema(zoo: &ModelZoo, param: &DonutParam) -> Vec<FormField> {
    vec![
        FormField {
            name: "model_name",
            label: "Model",
            kind: FieldKind::Select {
                options: zoo.models().map(str::to_string).collect(),
            },
            value: param.model_name.clone(),
        },
        FormField {
            name: "prompt",
            label: "Prompt",
            kind: FieldKind::Text,
            value: param.prompt.clone(),
        },
        FormField {
            name: "cuda",
            label: "Cuda",
            kind: FieldKind::Checkbox,
            value: crate::param::bool_token(param.cuda).to_string(),
        },
        FormField {
            name: "custom_model_folder",
            label: "Custom model folder",
            kind: FieldKind::Folder,
            value: param.custom_model_folder.clone(),
        },
    ]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zoo_auto_fills_the_task() {
        let zoo = ModelZoo::pretrained();
        let mut param = DonutParam::default();
        let form = ConfigForm {
            model_name: "naver-clova-ix/donut-base-finetuned-rvlcdip".to_string(),
            task_name: String::new(),
            prompt: String::new(),
            cuda: false,
            custom_model_folder: String::new(),
        };
        apply(&zoo, &form, &mut param);
        assert_eq!(param.task_name, "rvlcdip");
        assert!(param.update);
    }

    #[test]
    fn test_custom_folder_keeps_the_form_task() {
        let zoo = ModelZoo::pretrained();
        let mut param = DonutParam::default();
        let form = ConfigForm {
            model_name: "naver-clova-ix/donut-base-finetuned-docvqa".to_string(),
            task_name: "receipts".to_string(),
            prompt: String::new(),
            cuda: true,
            custom_model_folder: "/models/receipts".to_string(),
        };
        apply(&zoo, &form, &mut param);
        assert_eq!(param.task_name, "receipts");
    }

    #[test]
    fn test_prompt_only_change_stays_clean() {
        let zoo = ModelZoo::pretrained();
        let mut param = DonutParam {
            task_name: "docvqa".to_string(),
            ..DonutParam::default()
        };
        let mut form = ConfigForm::from_param(&param);
        form.prompt = "what is the invoice number".to_string();
        apply(&zoo, &form, &mut param);
        assert!(!param.update);
        assert_eq!(param.prompt, "what is the invoice number");
    }

    #[test]
    fn test_cuda_change_marks_dirty() {
        let zoo = ModelZoo::pretrained();
        let mut param = DonutParam {
            task_name: "docvqa".to_string(),
            ..DonutParam::default()
        };
        let mut form = ConfigForm::from_param(&param);
        form.cuda = false;
        apply(&zoo, &form, &mut param);
        assert!(param.update);
    }

    #[test]
    fn test_form_schema_lists_zoo_models() {
        let zoo = ModelZoo::pretrained();
        let param = DonutParam::default();
        let schema = form_schema(&zoo, &param);
        let model_field = schema.iter().find(|f| f.name == "model_name").unwrap();
        match &model_field.kind {
            FieldKind::Select { options } => assert_eq!(options.len(), 4),
            other => panic!("expected a select field, got {other:?}"),
        }
        assert_eq!(model_field.value, param.model_name);
    }
}
