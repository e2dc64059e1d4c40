/// Shader stage sources handed to the device for compilation

use std::fmt;
use std::path::Path;

use crate::engine_err;
use crate::error::Result;

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::TessControl => "tessellation control",
            ShaderStage::TessEvaluation => "tessellation evaluation",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
        };
        f.write_str(name)
    }
}

/// GLSL sources of one program
///
/// Vertex and fragment stages are mandatory, the others are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub tess_control: Option<String>,
    pub tess_evaluation: Option<String>,
    pub geometry: Option<String>,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            tess_control: None,
            tess_evaluation: None,
            geometry: None,
            fragment: fragment.into(),
        }
    }

    pub fn with_tess_control(mut self, source: impl Into<String>) -> Self {
        self.tess_control = Some(source.into());
        self
    }

    pub fn with_tess_evaluation(mut self, source: impl Into<String>) -> Self {
        self.tess_evaluation = Some(source.into());
        self
    }

    pub fn with_geometry(mut self, source: impl Into<String>) -> Self {
        self.geometry = Some(source.into());
        self
    }

    /// Read stage sources from disk
    ///
    /// # Arguments
    ///
    /// * `vertex` - Vertex shader file
    /// * `tess_control` - Optional tessellation control shader file
    /// * `tess_evaluation` - Optional tessellation evaluation shader file
    /// * `geometry` - Optional geometry shader file
    /// * `fragment` - Fragment shader file
    ///
    /// # Returns
    ///
    /// `Error::InvalidResource` naming the first file that could not be read
    pub fn from_files(
        vertex: &Path,
        tess_control: Option<&Path>,
        tess_evaluation: Option<&Path>,
        geometry: Option<&Path>,
        fragment: &Path,
    ) -> Result<Self> {
        Ok(Self {
            vertex: read_stage(vertex)?,
            tess_control: tess_control.map(read_stage).transpose()?,
            tess_evaluation: tess_evaluation.map(read_stage).transpose()?,
            geometry: geometry.map(read_stage).transpose()?,
            fragment: read_stage(fragment)?,
        })
    }

    /// Present stages in pipeline order
    pub fn stages(&self) -> Vec<(ShaderStage, &str)> {
        let mut stages = vec![(ShaderStage::Vertex, self.vertex.as_str())];
        if let Some(source) = &self.tess_control {
            stages.push((ShaderStage::TessControl, source.as_str()));
        }
        if let Some(source) = &self.tess_evaluation {
            stages.push((ShaderStage::TessEvaluation, source.as_str()));
        }
        if let Some(source) = &self.geometry {
            stages.push((ShaderStage::Geometry, source.as_str()));
        }
        stages.push((ShaderStage::Fragment, self.fragment.as_str()));
        stages
    }
}

fn read_stage(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        engine_err!(
            InvalidResource,
            "sge::ShaderSources",
            "Cannot read shader '{}': {}",
            path.display(),
            e
        )
    })
}
