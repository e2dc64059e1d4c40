/// Named registry of linked shader programs
///
/// Programs are compiled once through the device and looked up by name every
/// frame. Lookups never fail hard: an unknown name is reported on the logger
/// and yields the null program, which the device draws with as a no-op.

use rustc_hash::FxHashMap;

use crate::device::ProgramHandle;
use crate::render::RenderContext;
use crate::{engine_debug, engine_error, engine_info, engine_warn};
use super::shader_sources::ShaderSources;

#[derive(Debug, Default)]
pub struct ProgramRegistry {
    programs: FxHashMap<String, ProgramHandle>,
}

impl ProgramRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `sources` and store the program under `name`
    ///
    /// # Returns
    ///
    /// - the existing handle when `name` is already registered (nothing is compiled)
    /// - the new handle on success
    /// - `ProgramHandle::NULL` when compilation or linking fails; nothing is stored
    pub fn load(&mut self, ctx: &mut RenderContext, name: &str, sources: &ShaderSources) -> ProgramHandle {
        if let Some(&existing) = self.programs.get(name) {
            engine_warn!(
                "sge::ProgramRegistry",
                "Program '{}' already loaded, keeping handle {}",
                name,
                existing.raw()
            );
            return existing;
        }

        match ctx.device_mut().create_program(sources) {
            Ok(program) => {
                engine_debug!("sge::ProgramRegistry", "Program '{}' loaded as {}", name, program.raw());
                self.programs.insert(name.to_string(), program);
                program
            }
            Err(err) => {
                engine_error!("sge::ProgramRegistry", "Failed to load program '{}': {}", name, err);
                ProgramHandle::NULL
            }
        }
    }

    /// Handle of the program registered under `name`
    ///
    /// An unknown name logs one error naming it and returns `ProgramHandle::NULL`.
    pub fn get(&self, name: &str) -> ProgramHandle {
        match self.programs.get(name) {
            Some(&program) => program,
            None => {
                engine_error!("sge::ProgramRegistry", "Program '{}' missing from registry", name);
                ProgramHandle::NULL
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.programs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Delete every program on the device and empty the registry
    pub fn release_all(&mut self, ctx: &mut RenderContext) {
        let count = self.programs.len();
        for (_, program) in self.programs.drain() {
            ctx.device_mut().delete_program(program);
        }
        if count > 0 {
            engine_info!("sge::ProgramRegistry", "Released {} program(s)", count);
        }
    }
}

#[cfg(test)]
#[path = "program_registry_tests.rs"]
mod tests;
