//! Known pretrained Donut checkpoints.

/// Read-only table mapping pretrained checkpoint names to the task each one
/// was fine-tuned for. Owned by the model cache; selecting a known checkpoint
/// resolves its task automatically.
#[derive(Debug, Clone, Copy)]
pub struct ModelZoo {
    entries: &'static [(&'static str, &'static str)],
}

const PRETRAINED: &[(&str, &str)] = &[
    ("naver-clova-ix/donut-base-finetuned-docvqa", "docvqa"),
    ("naver-clova-ix/donut-base-finetuned-cord-v2", "cord-v2"),
    ("naver-clova-ix/donut-base-finetuned-rvlcdip", "rvlcdip"),
    (
        "naver-clova-ix/donut-base-finetuned-zhtrainticket",
        "zhtrainticket",
    ),
];

impl ModelZoo {
    pub fn pretrained() -> Self {
        Self {
            entries: PRETRAINED,
        }
    }

    /// The canonical task of a known checkpoint, `None` for unknown names.
    pub fn default_task(&self, model_name: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == model_name)
            .map(|(_, task)| *task)
    }

    pub fn contains(&self, model_name: &str) -> bool {
        self.default_task(model_name).is_some()
    }

    /// Checkpoint names in declaration order, for front-end dropdowns.
    pub fn models(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

impl Default for ModelZoo {
    fn default() -> Self {
        Self::pretrained()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_task_lookup() {
        let zoo = ModelZoo::pretrained();
        assert_eq!(
            zoo.default_task("naver-clova-ix/donut-base-finetuned-docvqa"),
            Some("docvqa")
        );
        assert_eq!(zoo.default_task("acme/receipt-parser"), None);
    }

    #[test]
    fn test_models_listing() {
        let zoo = ModelZoo::pretrained();
        assert_eq!(zoo.models().count(), 4);
        assert!(zoo.contains("naver-clova-ix/donut-base-finetuned-cord-v2"));
    }
}
