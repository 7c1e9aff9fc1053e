use crate::areas::repository::Repository;
use crate::artifacts::index::index_update::IndexUpdate;
use crate::artifacts::staging::add_report::AddReport;
use crate::artifacts::staging::add_target::AddTarget;
use crate::errors::{RepositoryError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

impl Repository {
    /// Stage files: store their content as blobs and record them in the index
    ///
    /// Specifiers that match no discoverable file are collected in the report
    /// as `FileNotInRepository`; every other error aborts the call.
    pub fn add(&self, target: AddTarget) -> Result<AddReport> {
        self.ensure_initialized()?;

        let ignore = self.ignore_patterns()?;
        let discoverable = self
            .workspace()
            .list_files(&ignore)
            .collect::<Result<Vec<_>>>()?;

        let mut report = AddReport::default();
        let selected: BTreeSet<PathBuf> = match target {
            AddTarget::All => discoverable.into_iter().collect(),
            AddTarget::Paths(specifiers) => {
                self.select_files(&specifiers, &discoverable, &mut report)
            }
        };

        let mut staged = BTreeMap::new();
        for path in selected {
            // the scanner only yields paths with a valid relative name
            let Some(name) = self.workspace().relative_name(&path) else {
                continue;
            };

            let content = self.workspace().read_file(&path)?;
            let oid = self.database().store_blob(content)?;
            staged.insert(name, oid);
        }

        if !staged.is_empty() {
            self.index().update(IndexUpdate::stage(staged.clone()))?;
        }

        for (name, oid) in staged {
            self.report(format_args!("staged {name} -> {oid}"))?;
            report.record_staged(name, oid);
        }

        tracing::debug!(
            staged = report.staged().len(),
            failed = report.failures().len(),
            "add finished"
        );

        Ok(report)
    }

    fn select_files(
        &self,
        specifiers: &[String],
        discoverable: &[PathBuf],
        report: &mut AddReport,
    ) -> BTreeSet<PathBuf> {
        let mut selected = BTreeSet::new();

        for specifier in specifiers {
            let resolved = self.workspace().resolve(specifier);

            // `starts_with` compares whole components, so `a` never matches `ab.txt`
            let matches = discoverable
                .iter()
                .filter(|path| path.starts_with(&resolved))
                .cloned()
                .collect::<Vec<_>>();

            if matches.is_empty() {
                report.record_failure(RepositoryError::FileNotInRepository(specifier.clone()));
            } else {
                selected.extend(matches);
            }
        }

        selected
    }
}
