use crate::render::InitError;

/// A WGSL program and the entry points a pipeline uses from it.
#[derive(Debug, Copy, Clone)]
pub struct ProgramDesc {
    pub label: &'static str,
    pub source: &'static str,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
}

pub(crate) const MESH_PROGRAM: ProgramDesc = ProgramDesc {
    label: "tumble mesh shader",
    source: include_str!("shaders/mesh.wgsl"),
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
};

pub(crate) const FLAT_PROGRAM: ProgramDesc = ProgramDesc {
    label: "tumble flat shader",
    source: include_str!("shaders/flat.wgsl"),
    vertex_entry: "vertex_passthrough",
    fragment_entry: "fragment_passthrough",
};

impl ProgramDesc {
    /// Fails if the source does not declare the configured entry points with the
    /// matching stage attribute.
    pub fn ensure_entry_points(&self) -> Result<(), InitError> {
        for (stage, entry) in [("@vertex", self.vertex_entry), ("@fragment", self.fragment_entry)] {
            if !declares_entry_point(self.source, stage, entry) {
                return Err(InitError::MissingEntryPoint {
                    program: self.label,
                    entry,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn create_module(&self, device: &wgpu::Device) -> Result<wgpu::ShaderModule, InitError> {
        self.ensure_entry_points()?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label),
            source: wgpu::ShaderSource::Wgsl(self.source.into()),
        }))
    }
}

/// Looks for `<stage> fn <name>(`, allowing arbitrary whitespace in between.
fn declares_entry_point(source: &str, stage: &str, name: &str) -> bool {
    source.match_indices(stage).any(|(at, _)| {
        let rest = source[at + stage.len()..].trim_start();
        let Some(rest) = rest.strip_prefix("fn") else { return false };
        if !rest.starts_with(char::is_whitespace) {
            return false;
        }
        let Some(rest) = rest.trim_start().strip_prefix(name) else { return false };
        rest.trim_start().starts_with('(')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "
        @vertex
        fn vs_main(@location(0) p: vec4<f32>) -> @builtin(position) vec4<f32> { return p; }

        @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }
    ";

    fn program(vertex_entry: &'static str, fragment_entry: &'static str) -> ProgramDesc {
        ProgramDesc {
            label: "test",
            source: SRC,
            vertex_entry,
            fragment_entry,
        }
    }

    #[test]
    fn finds_declared_entry_points() {
        assert!(program("vs_main", "fs_main").ensure_entry_points().is_ok());
    }

    #[test]
    fn missing_entry_point_reported() {
        let err = program("vertex_main", "fs_main").ensure_entry_points().unwrap_err();
        assert!(matches!(
            err,
            InitError::MissingEntryPoint {
                entry: "vertex_main",
                ..
            }
        ));
    }

    #[test]
    fn stage_must_match() {
        // fs_main exists, but not as a vertex entry point.
        assert!(program("fs_main", "fs_main").ensure_entry_points().is_err());
    }

    #[test]
    fn prefix_names_do_not_match() {
        assert!(!declares_entry_point(SRC, "@vertex", "vs"));
    }

    #[test]
    fn bundled_programs_declare_their_entry_points() {
        MESH_PROGRAM.ensure_entry_points().unwrap();
        FLAT_PROGRAM.ensure_entry_points().unwrap();
    }
}
