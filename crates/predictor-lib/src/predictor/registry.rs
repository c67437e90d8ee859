//! Immutable set of loaded classifiers, one per task

use super::{Classifier, ClassifierProvider};
use crate::error::StartupError;
use crate::models::Task;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Classifiers for every task, loaded once at startup
///
/// Each task has its own slot, so a submission can only ever reach the
/// classifier trained for its task.
#[derive(Clone)]
pub struct ClassifierRegistry {
    diabetes: Arc<dyn Classifier>,
    heart_disease: Arc<dyn Classifier>,
    parkinsons: Arc<dyn Classifier>,
}

impl ClassifierRegistry {
    /// Load all classifiers. Every task is attempted so the error lists
    /// all broken artifacts; any failure rejects the whole registry.
    pub fn load(provider: &dyn ClassifierProvider) -> Result<Self, StartupError> {
        let mut failures = Vec::new();
        let mut load = |task: Task| match provider.load(task) {
            Ok(classifier) => {
                info!(task = %task, "Classifier loaded");
                Some(classifier)
            }
            Err(e) => {
                warn!(task = %task, kind = e.kind(), error = %e, "Classifier failed to load");
                failures.push(e);
                None
            }
        };

        let diabetes = load(Task::Diabetes);
        let heart_disease = load(Task::HeartDisease);
        let parkinsons = load(Task::Parkinsons);

        match (diabetes, heart_disease, parkinsons) {
            (Some(diabetes), Some(heart_disease), Some(parkinsons)) => Ok(Self {
                diabetes,
                heart_disease,
                parkinsons,
            }),
            _ => Err(StartupError { failures }),
        }
    }

    pub fn get(&self, task: Task) -> &dyn Classifier {
        match task {
            Task::Diabetes => self.diabetes.as_ref(),
            Task::HeartDisease => self.heart_disease.as_ref(),
            Task::Parkinsons => self.parkinsons.as_ref(),
        }
    }
}

impl fmt::Debug for ClassifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierRegistry")
            .field("tasks", &Task::ALL)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::models::FeatureVector;
    use std::collections::HashSet;
    use std::path::PathBuf;

    struct TaskTagged(i64);

    impl Classifier for TaskTagged {
        fn predict(&self, _features: &FeatureVector) -> anyhow::Result<i64> {
            Ok(self.0)
        }
    }

    struct StubProvider {
        missing: HashSet<Task>,
        corrupt: HashSet<Task>,
    }

    impl StubProvider {
        fn healthy() -> Self {
            Self {
                missing: HashSet::new(),
                corrupt: HashSet::new(),
            }
        }
    }

    impl ClassifierProvider for StubProvider {
        fn load(&self, task: Task) -> Result<Arc<dyn Classifier>, LoadError> {
            if self.missing.contains(&task) {
                return Err(LoadError::NotFound {
                    task,
                    path: PathBuf::from(format!("models/{}.onnx", task)),
                });
            }
            if self.corrupt.contains(&task) {
                return Err(LoadError::Corrupt {
                    task,
                    reason: "truncated".to_string(),
                });
            }
            let tag = Task::ALL.iter().position(|t| *t == task).unwrap_or(0) as i64;
            Ok(Arc::new(TaskTagged(tag)))
        }
    }

    #[test]
    fn test_load_all_tasks() {
        let registry = ClassifierRegistry::load(&StubProvider::healthy()).unwrap();
        let features = FeatureVector::new(vec![]);

        for (tag, task) in Task::ALL.iter().enumerate() {
            assert_eq!(registry.get(*task).predict(&features).unwrap(), tag as i64);
        }
    }

    #[test]
    fn test_single_missing_artifact_fails_everything() {
        let provider = StubProvider {
            missing: [Task::Parkinsons].into_iter().collect(),
            corrupt: HashSet::new(),
        };

        let err = ClassifierRegistry::load(&provider).unwrap_err();
        assert_eq!(err.failed_tasks(), vec![Task::Parkinsons]);
        assert!(matches!(err.failures[0], LoadError::NotFound { .. }));
    }

    #[test]
    fn test_every_failure_reported() {
        let provider = StubProvider {
            missing: [Task::Diabetes].into_iter().collect(),
            corrupt: [Task::HeartDisease].into_iter().collect(),
        };

        let err = ClassifierRegistry::load(&provider).unwrap_err();
        assert_eq!(err.failed_tasks(), vec![Task::Diabetes, Task::HeartDisease]);
        assert_eq!(err.failures[1].kind(), "corrupt");
    }
}
