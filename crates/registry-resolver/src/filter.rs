//! Exclusivity arbitration between registries.
//!
//! Registries are consulted in configured order. A registry that does not
//! recognize a query is left out. If exactly one registry claims to be the
//! exclusive provider, it alone is authoritative no matter how many others
//! recognize the query. Two or more exclusive claimants are a configuration
//! conflict.

use std::sync::Arc;

use registry_catalog::{ArtifactCoords, Classification};
use registry_client::RegistryEndpoint;

use crate::error::{Error, Result};

/// Registries that claimed exclusivity over the same query, in configured
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusiveConflict<T> {
    pub claimants: Vec<T>,
}

/// Exclusive claims seen so far.
enum ExclusiveClaim<T> {
    Unclaimed,
    Claimed(T),
    Conflict(Vec<T>),
}

impl<T> ExclusiveClaim<T> {
    fn claim(self, registry: T) -> Self {
        match self {
            ExclusiveClaim::Unclaimed => ExclusiveClaim::Claimed(registry),
            ExclusiveClaim::Claimed(first) => ExclusiveClaim::Conflict(vec![first, registry]),
            ExclusiveClaim::Conflict(mut claimants) => {
                claimants.push(registry);
                ExclusiveClaim::Conflict(claimants)
            }
        }
    }
}

/// Select the registries authoritative for a query.
///
/// Returns the single exclusive provider if there is one, otherwise every
/// recognizing registry in original order.
pub fn filter_registries<T, F>(
    registries: &[T],
    mut classify: F,
) -> std::result::Result<Vec<T>, ExclusiveConflict<T>>
where
    T: Clone,
    F: FnMut(&T) -> Classification,
{
    let mut exclusive = ExclusiveClaim::Unclaimed;
    let mut recognized = Vec::with_capacity(registries.len());

    for registry in registries {
        match classify(registry) {
            Classification::NotRecognized => {}
            Classification::Recognized => recognized.push(registry.clone()),
            Classification::ExclusiveProvider => {
                exclusive = exclusive.claim(registry.clone());
            }
        }
    }

    match exclusive {
        ExclusiveClaim::Unclaimed => Ok(recognized),
        ExclusiveClaim::Claimed(provider) => Ok(vec![provider]),
        ExclusiveClaim::Conflict(claimants) => Err(ExclusiveConflict { claimants }),
    }
}

/// Registries authoritative for extensions based on a runtime core version.
pub fn registries_for_runtime_version(
    registries: &[Arc<dyn RegistryEndpoint>],
    runtime_core_version: &str,
) -> Result<Vec<Arc<dyn RegistryEndpoint>>> {
    filter_registries(registries, |registry| {
        let classification = registry.classify_runtime_version(runtime_core_version);
        if !classification.is_recognized() {
            tracing::debug!(
                registry = registry.id(),
                runtime_core_version,
                "Registry does not recognize runtime version"
            );
        }
        classification
    })
    .map_err(|conflict| {
        conflict_error(
            format!("extensions based on runtime version {runtime_core_version}"),
            conflict,
        )
    })
}

/// Registries authoritative for a platform BOM.
pub fn registries_for_platform(
    registries: &[Arc<dyn RegistryEndpoint>],
    bom: &ArtifactCoords,
) -> Result<Vec<Arc<dyn RegistryEndpoint>>> {
    filter_registries(registries, |registry| {
        let classification = registry.classify_platform(bom);
        if !classification.is_recognized() {
            tracing::debug!(registry = registry.id(), %bom, "Registry does not provide platform");
        }
        classification
    })
    .map_err(|conflict| conflict_error(format!("platform {bom}"), conflict))
}

fn conflict_error(subject: String, conflict: ExclusiveConflict<Arc<dyn RegistryEndpoint>>) -> Error {
    Error::ExclusiveProviderConflict {
        subject,
        registries: conflict
            .claimants
            .iter()
            .map(|r| r.id().to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use registry_catalog::Classification::{
        ExclusiveProvider as X, NotRecognized as N, Recognized as R,
    };
    use registry_test_utils::MockRegistry;
    use rstest::rstest;

    fn run(classes: &[Classification]) -> std::result::Result<Vec<usize>, ExclusiveConflict<usize>> {
        let registries: Vec<usize> = (0..classes.len()).collect();
        filter_registries(&registries, |i| classes[*i])
    }

    #[rstest]
    #[case(&[], vec![])]
    #[case(&[R, R, R], vec![0, 1, 2])]
    #[case(&[R, N, R], vec![0, 2])]
    #[case(&[N, N], vec![])]
    #[case(&[R, X, R], vec![1])]
    #[case(&[N, R, X], vec![2])]
    #[case(&[X], vec![0])]
    fn test_selection(#[case] classes: &[Classification], #[case] expected: Vec<usize>) {
        assert_eq!(run(classes).unwrap(), expected);
    }

    #[rstest]
    #[case(&[X, X], vec![0, 1])]
    #[case(&[X, R, N, X], vec![0, 3])]
    #[case(&[R, X, X, X], vec![1, 2, 3])]
    fn test_conflict(#[case] classes: &[Classification], #[case] claimants: Vec<usize>) {
        assert_eq!(run(classes).unwrap_err(), ExclusiveConflict { claimants });
    }

    fn endpoints(registries: Vec<MockRegistry>) -> Vec<Arc<dyn RegistryEndpoint>> {
        registries
            .into_iter()
            .map(|r| Arc::new(r) as Arc<dyn RegistryEndpoint>)
            .collect()
    }

    #[test]
    fn test_runtime_version_conflict_names_claimants() {
        let registries = endpoints(vec![
            MockRegistry::new("a").runtime_version("3.0.0", X),
            MockRegistry::new("b").runtime_version("3.0.0", R),
            MockRegistry::new("c").runtime_version("3.0.0", X),
        ]);

        match registries_for_runtime_version(&registries, "3.0.0") {
            Err(Error::ExclusiveProviderConflict { subject, registries }) => {
                assert_eq!(subject, "extensions based on runtime version 3.0.0");
                assert_eq!(registries, vec!["a", "c"]);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected a conflict"),
        }

        let selected = registries_for_runtime_version(&registries, "2.0.0").unwrap();
        let ids: Vec<&str> = selected.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_platform_exclusive_provider_wins() {
        let bom = ArtifactCoords::pom("io.acme.platform", "acme-bom", "3.0.0");
        let registries = endpoints(vec![
            MockRegistry::new("a"),
            MockRegistry::new("b").platform_classification(X),
            MockRegistry::new("c").platform_classification(N),
        ]);

        let selected = registries_for_platform(&registries, &bom).unwrap();
        let ids: Vec<&str> = selected.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_classifier_called_once_per_registry_in_order() {
        let registries = vec!["a", "b", "c"];
        let mut calls = Vec::new();
        let _ = filter_registries(&registries, |r| {
            calls.push(*r);
            R
        });
        assert_eq!(calls, vec!["a", "b", "c"]);
    }

    fn classification() -> impl Strategy<Value = Classification> {
        prop_oneof![Just(N), Just(R), Just(X)]
    }

    proptest! {
        #[test]
        fn test_exclusive_or_recognized_never_both(classes in prop::collection::vec(classification(), 0..12)) {
            let exclusive: Vec<usize> = (0..classes.len()).filter(|i| classes[*i] == X).collect();
            let recognized: Vec<usize> = (0..classes.len()).filter(|i| classes[*i] == R).collect();

            match run(&classes) {
                Ok(selected) => {
                    prop_assert!(exclusive.len() <= 1);
                    if exclusive.len() == 1 {
                        prop_assert_eq!(selected, exclusive);
                    } else {
                        prop_assert_eq!(selected, recognized);
                    }
                }
                Err(conflict) => {
                    prop_assert!(exclusive.len() >= 2);
                    prop_assert_eq!(conflict.claimants, exclusive);
                }
            }
        }
    }
}
