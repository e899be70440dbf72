use std::path::Path;

use log::{debug, error, info};
use model::{index_solids, Model, ModelError};
use rs42::extensions::PipeLine;
use stl_parser::{parse_file, ParseOptions};

/// Loads a batch of models. A model that fails to parse is skipped unless `fail_fast` is set.
pub struct App {
    options: ParseOptions,
    fail_fast: bool,
    models: Vec<Model>,
    failed: usize,
}

impl App {
    pub fn new(options: ParseOptions, fail_fast: bool) -> Self {
        Self {
            options,
            fail_fast,
            models: Vec::new(),
            failed: 0,
        }
    }

    pub fn load_all<P: AsRef<Path>>(
        &mut self,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<(), ModelError> {
        for path in paths {
            if let Err(err) = self.load(path.as_ref()) {
                if self.fail_fast {
                    return Err(err);
                }
                self.failed += 1;
                error!("Skipping model \"{}\"", path.as_ref().display());
            }
        }
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<(), ModelError> {
        let models = parse_file(path, &self.options)?
            .pipe(|solids| index_solids(&solids))
            .inspect_err(|err| error!("{err}"))?;
        debug!("Parsed model \"{}\", {} solid(s)", path.display(), models.len());

        for model in &models {
            debug!(
                "\"{}\": normals: {}, vertices: {}, elements: {}",
                model.name(),
                model.normals().len(),
                model.vertices().len(),
                model.elements().len(),
            );
        }
        self.models.extend(models);
        Ok(())
    }

    pub fn report(&self) {
        let vertices: usize = self.models.iter().map(|model| model.vertices().len()).sum();
        let elements: usize = self.models.iter().map(|model| model.elements().len()).sum();
        info!(
            "Loaded {} mesh(es) ({vertices} vertices, {elements} elements), {} file(s) skipped",
            self.models.len(),
            self.failed,
        );
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn failed(&self) -> usize {
        self.failed
    }
}
